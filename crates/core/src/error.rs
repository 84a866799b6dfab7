use crate::category::ComponentCategory;
use crate::types::ComponentId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown component: no {category} with id {id} in the catalog")]
    UnknownComponent {
        category: ComponentCategory,
        id: ComponentId,
    },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
