pub mod auth_service;
pub mod help_center_service;
pub mod user_service;
pub mod validation;

pub use auth_service::{AuthError, AuthPayload, AuthService, LoginDto, RegisterDto};
pub use help_center_service::{
    CreateHelpCenterTopicDto, HelpCenterService, TopicAction, TopicError, UpdateHelpCenterTopicDto,
};
pub use user_service::{
    CreateUserOptions, DeactivateAccountDto, DeactivatedUser, UpdateUserDto, UpdatedUser, UserDetails, UserError,
    UserList, UserService, UserSummary,
};
pub use validation::ValidationError;
