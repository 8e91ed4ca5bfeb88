pub mod help_center_topic;
pub mod organisation;
pub mod profile;
pub mod user;

pub use help_center_topic::{HelpCenterTopic, TopicView};
pub use organisation::{Organisation, OrganisationMember};
pub use profile::Profile;
pub use user::{User, UserRecord, UserType, UserView};
