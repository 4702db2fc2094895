use crate::service_offering::ServiceCategory;
use crate::shared::entity::{Entity, ID};

/// An `Artist` performs `ServiceOffering`s at a `Store` and is assigned
/// to `Appointment`s.
#[derive(Debug, Clone)]
pub struct Artist {
    pub id: ID,
    pub store_id: ID,
    pub name: String,
    pub email: Option<String>,
    /// Percentage of the service price the artist keeps. Must be within
    /// 0..=100.
    pub commission_rate: i64,
    pub specialties: Vec<ServiceCategory>,
}

impl Artist {
    pub fn new(store_id: ID, name: &str, commission_rate: i64) -> Self {
        Self {
            id: Default::default(),
            store_id,
            name: name.to_string(),
            email: None,
            commission_rate,
            specialties: Vec::new(),
        }
    }

    pub fn valid_commission_rate(commission_rate: i64) -> bool {
        (0..=100).contains(&commission_rate)
    }
}

impl Entity for Artist {
    fn id(&self) -> &ID {
        &self.id
    }
}
