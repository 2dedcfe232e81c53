//! Data transfer objects for service inputs and outputs
//!
//! This module provides:
//! - Request DTOs with validation for service inputs
//! - Response DTOs for serializing service outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateOfferRequest, ImageUpload, ReviewForm, SendMessageRequest, UpdateProfileRequest,
};

// Re-export commonly used response types
pub use responses::{
    ConversationResponse, InboxEntryResponse, MessageResponse, OfferDetailResponse, OfferResponse,
    OwnProfileResponse, ProfileResponse, RatingSummaryResponse, ReviewDetailResponse,
    ReviewReceiptResponse, ReviewResponse, ReviewableSwapResponse, UploadedImageResponse,
};

// Re-export mappers and helper structs
pub use mappers::{InboxEntry, ReviewWithContext, ReviewableSwap};
