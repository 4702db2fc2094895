mod appointment;
mod artist;
mod client;
mod reminder;
mod service_offering;
mod status;
mod store;

pub mod dtos {
    pub use crate::appointment::dtos::*;
    pub use crate::artist::dtos::*;
    pub use crate::client::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::service_offering::dtos::*;
    pub use crate::store::dtos::*;
}

pub use crate::appointment::api::*;
pub use crate::artist::api::*;
pub use crate::client::api::*;
pub use crate::reminder::api::*;
pub use crate::service_offering::api::*;
pub use crate::status::api::*;
pub use crate::store::api::*;
