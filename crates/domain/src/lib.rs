mod appointment;
mod artist;
mod client;
mod confirmation;
mod reminder;
mod service_offering;
mod shared;
mod store;

pub use appointment::{Appointment, AppointmentStatus};
pub use artist::Artist;
pub use client::{Channel, Client, CommunicationPreferences};
pub use confirmation::AppointmentConfirmationToken;
pub use reminder::{ReminderCounters, ReminderSchedule, ReminderStats, ReminderType};
pub use service_offering::{ServiceCategory, ServiceOffering};
pub use shared::entity::{Entity, ID};
pub use store::{Store, StoreSettings};
