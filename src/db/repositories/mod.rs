//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod challenge_repo;
pub mod invite_repo;
pub mod membership_repo;
pub mod room_repo;
pub mod user_repo;
pub mod workproof_repo;

pub use challenge_repo::{ChallengeCounts, ChallengeRepository};
pub use invite_repo::InviteRepository;
pub use membership_repo::{MemberWithProfile, MembershipRepository};
pub use room_repo::RoomRepository;
pub use user_repo::UserRepository;
pub use workproof_repo::WorkproofRepository;
