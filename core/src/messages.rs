//! Fixed status-line strings.

pub const SUCCESS: &str = "Success";
pub const DELETED: &str = "Wishlist has been Deleted!";
pub const CLEARED: &str = "Wishlist has been Cleared!";
pub const SERVER_ERROR: &str = "Server error!";
pub const ID_REQUIRED: &str = "Wishlist ID is required";
