//! # social-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, FollowService, LikeService, MessagingService,
    NotificationService, PostService, SecondaryEffects, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
