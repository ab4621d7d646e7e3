/// Record collections exposed by the Permit Store.
///
/// Occupancy is not a collection of its own: it reads business permits and
/// writes payment fields through the business collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Business,
    Fsic,
}

impl Resource {
    fn prefix(self) -> &'static str {
        match self {
            Resource::Business => "firestation/business",
            Resource::Fsic => "businessfsic/data",
        }
    }

    pub fn list_path(self) -> String {
        format!("{}/GetPermit", self.prefix())
    }

    pub fn search_path(self) -> String {
        format!("{}/search", self.prefix())
    }

    pub fn create_path(self) -> String {
        format!("{}/CreatePermit", self.prefix())
    }

    pub fn update_path(self) -> String {
        format!("{}/UpdatePermit", self.prefix())
    }

    /// Only FSIC has a status-only endpoint; business permits are updated whole.
    pub fn status_path(self) -> Option<String> {
        match self {
            Resource::Business => None,
            Resource::Fsic => Some(format!("{}/UpdateStatus", self.prefix())),
        }
    }

    pub fn payment_path(self) -> Option<String> {
        match self {
            Resource::Business => Some(format!("{}/UpdateOccupancyPaymentStatus", self.prefix())),
            Resource::Fsic => None,
        }
    }

    pub fn delete_path(self) -> String {
        format!("{}/DeletePermit", self.prefix())
    }
}

pub const LOGIN_PATH: &str = "account/firestation/login";
pub const LOGOUT_PATH: &str = "account/firestation/logout";
