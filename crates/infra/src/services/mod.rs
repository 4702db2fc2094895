mod notification;

pub use notification::{
    INotificationService, InMemoryNotificationService, NotificationGateway, ReminderMessage,
    SentMessage,
};
