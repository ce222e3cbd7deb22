//! Business logic services

pub mod auth_service;
pub mod challenge_service;
pub mod export;
pub mod membership_service;
pub mod room_service;
pub mod upload_service;
pub mod user_service;
pub mod workproof_service;

pub use auth_service::AuthService;
pub use challenge_service::ChallengeService;
pub use membership_service::MembershipService;
pub use room_service::RoomService;
pub use upload_service::UploadService;
pub use user_service::UserService;
pub use workproof_service::WorkproofService;
