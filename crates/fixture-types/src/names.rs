//! Database and collection names used by the seed plan.

/// Database holding the type-probe collection.
pub const PROBE_DATABASE: &str = "kestra";

/// Collection holding the type-probe records.
pub const PROBE_COLLECTION: &str = "mongo_types";

/// Collection dropped from [`PROBE_DATABASE`] but never written to.
pub const LEGACY_TERRITORY_COLLECTION: &str = "second_employee_territory";

/// Database holding the association collection.
pub const ASSOCIATION_DATABASE: &str = "second";

/// Collection holding the employee/territory association records.
pub const ASSOCIATION_COLLECTION: &str = "employeeTerritory";
