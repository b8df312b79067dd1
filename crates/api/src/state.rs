//! Application state: one lifecycle engine per configuration kind.

use std::sync::Arc;

use axum::extract::FromRef;
use payroll_config_core::lifecycle::{
    ConfigEntity, ConfigStore, LifecycleEngine, MemoryConfigStore, PermissiveGuard,
    ReferenceGuard,
};
use payroll_config_core::rules::{
    Allowance, InsuranceBracket, PayGrade, PayType, PayrollPolicy, RuleSettings, SigningBonus,
    TaxRule, TerminationBenefit,
};
use payroll_config_core::settings::{CompanySettingsService, MemorySettingsStore, SettingsStore};
use payroll_config_db::{SeaOrmConfigStore, SeaOrmSettingsStore};
use sea_orm::DatabaseConnection;

/// Supplies a persistence collaborator for every kind.
pub trait StoreProvider {
    /// Store for configuration kind `T`.
    fn config_store<T: ConfigEntity>(&self) -> Arc<dyn ConfigStore<T>>;

    /// Store for company settings.
    fn settings_store(&self) -> Arc<dyn SettingsStore>;
}

/// Keeps everything in process memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStores;

impl StoreProvider for MemoryStores {
    fn config_store<T: ConfigEntity>(&self) -> Arc<dyn ConfigStore<T>> {
        Arc::new(MemoryConfigStore::<T>::new())
    }

    fn settings_store(&self) -> Arc<dyn SettingsStore> {
        Arc::new(MemorySettingsStore::new())
    }
}

/// Persists to PostgreSQL through SeaORM.
#[derive(Debug, Clone)]
pub struct DatabaseStores {
    db: DatabaseConnection,
}

impl DatabaseStores {
    /// Wraps an open connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl StoreProvider for DatabaseStores {
    fn config_store<T: ConfigEntity>(&self) -> Arc<dyn ConfigStore<T>> {
        Arc::new(SeaOrmConfigStore::<T>::new(self.db.clone()))
    }

    fn settings_store(&self) -> Arc<dyn SettingsStore> {
        Arc::new(SeaOrmSettingsStore::new(self.db.clone()))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pay type engine.
    pub pay_types: Arc<LifecycleEngine<PayType>>,
    /// Pay grade engine.
    pub pay_grades: Arc<LifecycleEngine<PayGrade>>,
    /// Payroll policy engine.
    pub payroll_policies: Arc<LifecycleEngine<PayrollPolicy>>,
    /// Allowance engine.
    pub allowances: Arc<LifecycleEngine<Allowance>>,
    /// Insurance bracket engine.
    pub insurance_brackets: Arc<LifecycleEngine<InsuranceBracket>>,
    /// Signing bonus engine.
    pub signing_bonuses: Arc<LifecycleEngine<SigningBonus>>,
    /// Tax rule engine.
    pub tax_rules: Arc<LifecycleEngine<TaxRule>>,
    /// Termination benefit engine.
    pub termination_benefits: Arc<LifecycleEngine<TerminationBenefit>>,
    /// Company settings service.
    pub settings: Arc<CompanySettingsService>,
}

impl AppState {
    /// Builds every engine over `stores`, sharing one reference guard.
    pub fn new(
        stores: &impl StoreProvider,
        guard: &Arc<dyn ReferenceGuard>,
        rules: &RuleSettings,
    ) -> Self {
        fn engine<T: ConfigEntity>(
            stores: &impl StoreProvider,
            guard: &Arc<dyn ReferenceGuard>,
            rules: &RuleSettings,
        ) -> Arc<LifecycleEngine<T>> {
            Arc::new(LifecycleEngine::new(
                stores.config_store::<T>(),
                Arc::clone(guard),
                rules.clone(),
            ))
        }

        Self {
            pay_types: engine(stores, guard, rules),
            pay_grades: engine(stores, guard, rules),
            payroll_policies: engine(stores, guard, rules),
            allowances: engine(stores, guard, rules),
            insurance_brackets: engine(stores, guard, rules),
            signing_bonuses: engine(stores, guard, rules),
            tax_rules: engine(stores, guard, rules),
            termination_benefits: engine(stores, guard, rules),
            settings: Arc::new(CompanySettingsService::new(stores.settings_store())),
        }
    }

    /// State backed by in-memory stores.
    #[must_use]
    pub fn in_memory(rules: &RuleSettings) -> Self {
        let guard: Arc<dyn ReferenceGuard> = Arc::new(PermissiveGuard::default());
        Self::new(&MemoryStores, &guard, rules)
    }

    /// State backed by PostgreSQL.
    #[must_use]
    pub fn with_database(db: DatabaseConnection, rules: &RuleSettings) -> Self {
        let guard: Arc<dyn ReferenceGuard> = Arc::new(PermissiveGuard::default());
        Self::new(&DatabaseStores::new(db), &guard, rules)
    }
}

/// Lets handlers extract the engine for their kind straight from the state.
macro_rules! engine_from_state {
    ($($field:ident: $kind:ty),* $(,)?) => {
        $(
            impl FromRef<AppState> for Arc<LifecycleEngine<$kind>> {
                fn from_ref(state: &AppState) -> Self {
                    Arc::clone(&state.$field)
                }
            }
        )*
    };
}

engine_from_state!(
    pay_types: PayType,
    pay_grades: PayGrade,
    payroll_policies: PayrollPolicy,
    allowances: Allowance,
    insurance_brackets: InsuranceBracket,
    signing_bonuses: SigningBonus,
    tax_rules: TaxRule,
    termination_benefits: TerminationBenefit,
);

impl FromRef<AppState> for Arc<CompanySettingsService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.settings)
    }
}
