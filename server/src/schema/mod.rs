pub mod album;
pub mod moment;
pub mod timeline;
pub use album::*;
pub use moment::*;
pub use timeline::*;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, ToSchema)]
pub struct ErrorView {
    pub error: String,
}
