pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery, normalize_page};
pub use response::ApiResponse;
