//! Service Integration Tests
//!
//! Exercise the service layer end to end against in-memory adapters.
//! No Postgres or Redis required; change-feed publishes fall back to
//! best-effort no-ops.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use chrono::{Duration, Utc};
use uuid::Uuid;

use integration_tests::{fake_image_bytes, TestWorld};
use swap_core::entities::{MatchState, OfferKind, OfferStatus};
use swap_core::error::DomainError;
use swap_core::traits::{ConversationRepository, MessageRepository, OfferQuery};
use swap_service::dto::{ImageUpload, ReviewForm, SendMessageRequest, UpdateProfileRequest};
use swap_service::{
    ChatService, ConversationService, OfferService, ProfileService, ReviewService, ServiceError,
    UnreadService,
};

// ============================================================================
// Full Swap Lifecycle
// ============================================================================

#[tokio::test]
async fn test_full_swap_lifecycle() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;

    // Anna posts an offer; Ben finds it in the open feed
    let offer = world.post_offer(&anna, "Bike repair").await;
    let feed = OfferService::new(&world.ctx)
        .browse(OfferQuery::default())
        .await
        .unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].id, offer.id);

    // Ben gets in touch and they talk
    let conversation_id = world.contact(&ben, offer.id).await;
    world.say(&ben, conversation_id, "Hi, is this still available?").await;
    world.say(&anna, conversation_id, "It is! When works for you?").await;

    // Both agree; the second agreement matches the thread and delists
    // the offer
    let chat = ChatService::new(&world.ctx);
    let mut anna_view = chat.open_chat(&anna, conversation_id).await.unwrap();
    let outcome = chat.toggle_match(&anna, &mut anna_view).await.unwrap();
    assert_eq!(outcome.state, MatchState::Pending);
    assert!(!outcome.offer_delisted);

    let mut ben_view = chat.open_chat(&ben, conversation_id).await.unwrap();
    let outcome = chat.toggle_match(&ben, &mut ben_view).await.unwrap();
    assert_eq!(outcome.state, MatchState::Mutual);
    assert!(outcome.offer_delisted);
    assert!(ben_view.is_matched());
    assert!(ben_view.take_match_notice());

    let stored = world.store.offer(offer.id).unwrap();
    assert_eq!(stored.status, OfferStatus::Matched);
    let feed = OfferService::new(&world.ctx)
        .browse(OfferQuery::default())
        .await
        .unwrap();
    assert!(feed.is_empty());

    // Anna marks the swap done
    let completed = OfferService::new(&world.ctx)
        .complete_offer(&anna, offer.id)
        .await
        .unwrap();
    assert_eq!(completed.status, OfferStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(world.store.profile(anna.user_id()).unwrap().completed_swaps, 1);

    // Ben leaves five stars; the receipt carries the fresh aggregate
    // and the form resets
    let reviews = ReviewService::new(&world.ctx);
    assert!(reviews.can_review(&ben, offer.id).await.unwrap());

    let mut form = ReviewForm {
        stars: 5,
        comment: Some("Fixed my flat in ten minutes".to_string()),
    };
    let receipt = reviews
        .submit(&ben, &mut form, offer.id, anna.user_id())
        .await
        .unwrap();
    assert_eq!(receipt.review.stars, 5);
    assert_eq!(receipt.reviewee_rating.total_reviews, 1);
    assert!((receipt.reviewee_rating.avg_rating - 5.0).abs() < 1e-9);
    assert_eq!(form.stars, 0);
    assert!(form.comment.is_none());

    // A second attempt hits the duplicate guard; the first review stays
    let mut again = ReviewForm {
        stars: 1,
        comment: None,
    };
    let err = reviews
        .submit(&ben, &mut again, offer.id, anna.user_id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyReviewed)
    ));
    assert_eq!(world.store.review_count(), 1);
    assert!((world.store.profile(anna.user_id()).unwrap().rating - 5.0).abs() < 1e-9);
    assert!(!reviews.can_review(&ben, offer.id).await.unwrap());
}

// ============================================================================
// Match Agreement
// ============================================================================

#[tokio::test]
async fn test_match_requires_both_participants() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Sourdough baking").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    let chat = ChatService::new(&world.ctx);
    let mut ben_view = chat.open_chat(&ben, conversation_id).await.unwrap();
    let outcome = chat.toggle_match(&ben, &mut ben_view).await.unwrap();

    assert_eq!(outcome.state, MatchState::Pending);
    assert!(!ben_view.is_matched());
    assert!(ben_view.has_agreed(ben.user_id()));
    assert!(!ben_view.has_agreed(anna.user_id()));
    assert!(!ben_view.take_match_notice());

    // The offer stays listed until both sides agree
    assert_eq!(
        world.store.offer(offer.id).unwrap().status,
        OfferStatus::Open
    );
}

#[tokio::test]
async fn test_toggle_retracts_agreement() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Tax help").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    let chat = ChatService::new(&world.ctx);
    let mut view = chat.open_chat(&ben, conversation_id).await.unwrap();

    chat.toggle_match(&ben, &mut view).await.unwrap();
    let outcome = chat.toggle_match(&ben, &mut view).await.unwrap();

    assert_eq!(outcome.state, MatchState::Removed);
    assert!(!view.has_agreed(ben.user_id()));
    assert!(view.conversation().matched_by.is_empty());
}

#[tokio::test]
async fn test_unmatch_does_not_relist_offer() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Dog walking").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    let chat = ChatService::new(&world.ctx);
    let mut anna_view = chat.open_chat(&anna, conversation_id).await.unwrap();
    chat.toggle_match(&anna, &mut anna_view).await.unwrap();
    let mut ben_view = chat.open_chat(&ben, conversation_id).await.unwrap();
    chat.toggle_match(&ben, &mut ben_view).await.unwrap();
    assert_eq!(
        world.store.offer(offer.id).unwrap().status,
        OfferStatus::Matched
    );

    // One side backs out; the thread unmatches but the delist stands
    let refreshed = world
        .ctx
        .conversation_repo()
        .find_by_id(conversation_id)
        .await
        .unwrap()
        .unwrap();
    ben_view.apply_conversation_update(refreshed);
    let outcome = chat.toggle_match(&ben, &mut ben_view).await.unwrap();

    assert_eq!(outcome.state, MatchState::Removed);
    assert!(!outcome.offer_delisted);
    assert_eq!(
        world.store.offer(offer.id).unwrap().status,
        OfferStatus::Matched
    );
}

#[tokio::test]
async fn test_match_notice_fires_once_per_transition() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Guitar lessons").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    let chat = ChatService::new(&world.ctx);
    let mut anna_view = chat.open_chat(&anna, conversation_id).await.unwrap();
    chat.toggle_match(&anna, &mut anna_view).await.unwrap();
    assert!(!anna_view.take_match_notice());

    let mut ben_view = chat.open_chat(&ben, conversation_id).await.unwrap();
    chat.toggle_match(&ben, &mut ben_view).await.unwrap();

    // Anna's open view learns about the match through the pushed row
    let refreshed = world
        .ctx
        .conversation_repo()
        .find_by_id(conversation_id)
        .await
        .unwrap()
        .unwrap();
    anna_view.apply_conversation_update(refreshed.clone());
    assert!(anna_view.take_match_notice());
    assert!(!anna_view.take_match_notice());

    // The same row pushed again changes nothing
    anna_view.apply_conversation_update(refreshed);
    assert!(!anna_view.take_match_notice());

    // A freshly opened view of a matched thread announces it once
    let mut late_view = chat.open_chat(&anna, conversation_id).await.unwrap();
    assert!(late_view.take_match_notice());
    assert!(!late_view.take_match_notice());
}

// ============================================================================
// Conversations
// ============================================================================

#[tokio::test]
async fn test_contact_twice_returns_same_thread() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Window cleaning").await;

    let first = world.contact(&ben, offer.id).await;
    let second = world.contact(&ben, offer.id).await;

    assert_eq!(first, second);
    let conversations = ConversationService::new(&world.ctx)
        .list_conversations(&ben)
        .await
        .unwrap();
    assert_eq!(conversations.len(), 1);
}

#[tokio::test]
async fn test_owner_cannot_contact_own_offer() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let offer = world.post_offer(&anna, "Piano tuning").await;

    let err = ConversationService::new(&world.ctx)
        .start_conversation(&anna, offer.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::CannotConverseWithSelf)
    ));
}

#[tokio::test]
async fn test_inbox_lists_latest_activity_first_with_unread_counts() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let cara = world.member("cara").await;

    let bike = world.post_offer(&anna, "Bike repair").await;
    let yoga = world.post_offer(&anna, "Yoga class").await;
    let with_ben = world.contact(&ben, bike.id).await;
    let with_cara = world.contact(&cara, yoga.id).await;

    world.say(&ben, with_ben, "Hello!").await;
    world.say(&cara, with_cara, "Hi there").await;
    world.say(&cara, with_cara, "Still free on Sunday?").await;

    let inbox = ConversationService::new(&world.ctx)
        .list_conversations(&anna)
        .await
        .unwrap();

    assert_eq!(inbox.len(), 2);
    // Cara wrote last, so her thread leads
    assert_eq!(inbox[0].conversation.id, with_cara);
    assert_eq!(inbox[0].other_user.id, cara.user_id());
    assert_eq!(inbox[0].unread_count, 2);
    assert_eq!(
        inbox[0].last_message.as_ref().unwrap().content,
        "Still free on Sunday?"
    );
    assert_eq!(inbox[1].conversation.id, with_ben);
    assert_eq!(inbox[1].unread_count, 1);
}

// ============================================================================
// Messaging
// ============================================================================

#[tokio::test]
async fn test_message_content_is_trimmed_and_blank_rejected() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Knife sharpening").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    let chat = ChatService::new(&world.ctx);
    let sent = chat
        .send_message(
            &ben,
            conversation_id,
            SendMessageRequest {
                content: "  see you at noon  ".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(sent.content, "see you at noon");

    let err = chat
        .send_message(
            &ben,
            conversation_id,
            SendMessageRequest {
                content: "   ".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::EmptyMessage)
    ));
    assert_eq!(world.store.message_count(), 1);
}

#[tokio::test]
async fn test_outsider_cannot_read_or_write_thread() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let mallory = world.member("mallory").await;
    let offer = world.post_offer(&anna, "Plant sitting").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    let chat = ChatService::new(&world.ctx);

    let err = chat.open_chat(&mallory, conversation_id).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotConversationParticipant)
    ));

    let err = chat
        .send_message(
            &mallory,
            conversation_id,
            SendMessageRequest {
                content: "let me in".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotConversationParticipant)
    ));
}

#[tokio::test]
async fn test_history_pages_without_duplicates_in_order() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Language exchange").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    // 120 messages with strictly increasing timestamps
    let base = Utc::now() - Duration::seconds(600);
    for i in 0..120 {
        let sender = if i % 2 == 0 { &ben } else { &anna };
        let id = world.say(sender, conversation_id, &format!("message {i}")).await;
        world
            .store
            .backdate_message(id, base + Duration::seconds(i));
    }

    let chat = ChatService::new(&world.ctx);
    let mut view = chat.open_chat(&ben, conversation_id).await.unwrap();
    assert_eq!(view.messages().len(), 50);
    assert!(view.feed().has_more());
    assert_eq!(view.messages().last().unwrap().content, "message 119");
    assert_eq!(view.messages().first().unwrap().content, "message 70");

    let fetched = chat.load_older(&mut view).await.unwrap();
    assert_eq!(fetched, 50);
    let fetched = chat.load_older(&mut view).await.unwrap();
    assert_eq!(fetched, 20);
    assert!(!view.feed().has_more());

    // Nothing older remains; asking again is a no-op
    let fetched = chat.load_older(&mut view).await.unwrap();
    assert_eq!(fetched, 0);

    let messages = view.messages();
    assert_eq!(messages.len(), 120);
    assert_eq!(messages.first().unwrap().content, "message 0");

    let mut seen = std::collections::HashSet::new();
    for window in messages.windows(2) {
        assert!(window[0].created_at <= window[1].created_at);
        assert!(seen.insert(window[0].id));
    }
    assert!(seen.insert(messages.last().unwrap().id));
    assert_eq!(seen.len(), 120);
}

#[tokio::test]
async fn test_opening_chat_marks_inbound_read() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Sewing repairs").await;
    let conversation_id = world.contact(&ben, offer.id).await;

    world.say(&ben, conversation_id, "one").await;
    world.say(&ben, conversation_id, "two").await;
    world.say(&anna, conversation_id, "reply").await;

    let chat = ChatService::new(&world.ctx);
    chat.open_chat(&anna, conversation_id).await.unwrap();

    // Anna's inbound messages flip to read; her own reply stays unread
    // for Ben until he opens the thread
    let unread_for_anna = world
        .ctx
        .message_repo()
        .unread_in_conversation(conversation_id, anna.user_id())
        .await
        .unwrap();
    assert_eq!(unread_for_anna, 0);

    let unread_for_ben = world
        .ctx
        .message_repo()
        .unread_in_conversation(conversation_id, ben.user_id())
        .await
        .unwrap();
    assert_eq!(unread_for_ben, 1);
}

// ============================================================================
// Unread Badge
// ============================================================================

#[tokio::test]
async fn test_unread_total_drops_after_reading_a_thread() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;

    let bike = world.post_offer(&anna, "Bike repair").await;
    let yoga = world.post_offer(&anna, "Yoga class").await;
    let first = world.contact(&ben, bike.id).await;
    let second = world.contact(&ben, yoga.id).await;

    world.say(&ben, first, "a").await;
    world.say(&ben, first, "b").await;
    world.say(&ben, second, "c").await;
    world.say(&ben, second, "d").await;
    world.say(&ben, second, "e").await;

    let unread = UnreadService::new(&world.ctx);
    assert_eq!(unread.unread_total(&anna).await.unwrap(), 5);

    // Reading one thread leaves only the other thread's messages
    ChatService::new(&world.ctx)
        .open_chat(&anna, first)
        .await
        .unwrap();
    assert_eq!(unread.unread_total(&anna).await.unwrap(), 3);

    // Messages one sent never count toward one's own badge
    assert_eq!(unread.unread_total(&ben).await.unwrap(), 0);
}

// ============================================================================
// Offers
// ============================================================================

#[tokio::test]
async fn test_browse_filters_by_kind() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;

    world.post_offer(&anna, "Offering haircuts").await;
    let request = OfferService::new(&world.ctx)
        .create_offer(
            &ben,
            swap_service::dto::CreateOfferRequest {
                kind: OfferKind::Request,
                skill: "Looking for a painter".to_string(),
                description: "One wall, paint provided".to_string(),
                zip: "04109".to_string(),
                city: None,
                tags: vec!["painting".to_string()],
            },
            None,
        )
        .await
        .unwrap();

    let offers = OfferService::new(&world.ctx);
    assert_eq!(offers.browse(OfferQuery::default()).await.unwrap().len(), 2);

    let only_requests = offers
        .browse(OfferQuery {
            kind: Some(OfferKind::Request),
        })
        .await
        .unwrap();
    assert_eq!(only_requests.len(), 1);
    assert_eq!(only_requests[0].id, request.id);
}

#[tokio::test]
async fn test_complete_offer_requires_owner_and_runs_once() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Furniture assembly").await;

    let offers = OfferService::new(&world.ctx);

    let err = offers.complete_offer(&ben, offer.id).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotOfferOwner)
    ));

    offers.complete_offer(&anna, offer.id).await.unwrap();
    let err = offers.complete_offer(&anna, offer.id).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::OfferAlreadyCompleted)
    ));
}

#[tokio::test]
async fn test_offer_detail_joins_owner_and_review_state() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Bread baking").await;

    let offers = OfferService::new(&world.ctx);
    let detail = offers.offer_detail(&ben, offer.id).await.unwrap();
    assert_eq!(detail.owner.id, anna.user_id());
    assert!(!detail.viewer_reviewed);

    offers.complete_offer(&anna, offer.id).await.unwrap();
    let mut form = ReviewForm {
        stars: 4,
        comment: None,
    };
    ReviewService::new(&world.ctx)
        .submit(&ben, &mut form, offer.id, anna.user_id())
        .await
        .unwrap();

    let detail = offers.offer_detail(&ben, offer.id).await.unwrap();
    assert!(detail.viewer_reviewed);
}

#[tokio::test]
async fn test_offer_image_failure_aborts_creation() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;

    // One byte over the 1 MB test limit
    let oversized = vec![0u8; 1024 * 1024 + 1];
    let err = OfferService::new(&world.ctx)
        .create_offer(
            &anna,
            swap_service::dto::CreateOfferRequest {
                kind: OfferKind::Offer,
                skill: "Photography".to_string(),
                description: "Portraits and events".to_string(),
                zip: "04109".to_string(),
                city: None,
                tags: Vec::new(),
            },
            Some(ImageUpload::new(oversized, "image/jpeg")),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ImageTooLarge { .. })
    ));
    assert_eq!(world.blobs.object_count(), 0);
    assert!(OfferService::new(&world.ctx)
        .browse(OfferQuery::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_offer_created_with_image_stores_blob() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;

    let offer = OfferService::new(&world.ctx)
        .create_offer(
            &anna,
            swap_service::dto::CreateOfferRequest {
                kind: OfferKind::Offer,
                skill: "Photography".to_string(),
                description: "Portraits and events".to_string(),
                zip: "04109".to_string(),
                city: None,
                tags: Vec::new(),
            },
            Some(ImageUpload::new(fake_image_bytes(), "image/jpeg")),
        )
        .await
        .unwrap();

    assert!(offer.image_url.is_some());
    assert_eq!(world.blobs.object_count(), 1);
    let path = world.blobs.paths().pop().unwrap();
    assert!(path.starts_with(&format!("offer-images/{}/offer-", anna.user_id())));
    assert!(path.ends_with(".jpg"));
}

// ============================================================================
// Profiles
// ============================================================================

#[tokio::test]
async fn test_update_profile_touches_only_given_fields() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;

    let profiles = ProfileService::new(&world.ctx);
    profiles
        .update_profile(
            &anna,
            UpdateProfileRequest {
                bio: Some("I fix bikes".to_string()),
                city: Some("Leipzig".to_string()),
                zip: Some("04109".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = profiles
        .update_profile(
            &anna,
            UpdateProfileRequest {
                skills_offered: Some(vec!["bike repair".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.bio.as_deref(), Some("I fix bikes"));
    assert_eq!(updated.city.as_deref(), Some("Leipzig"));
    assert_eq!(updated.zip.as_deref(), Some("04109"));
    assert_eq!(updated.skills_offered, vec!["bike repair".to_string()]);
    assert_eq!(updated.name, "anna");
}

#[tokio::test]
async fn test_avatar_upload_replaces_previous_file() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;

    let profiles = ProfileService::new(&world.ctx);
    let first = profiles
        .update_avatar(&anna, ImageUpload::new(fake_image_bytes(), "image/png"))
        .await
        .unwrap();
    let first_url = first.avatar_url.clone().unwrap();

    // Distinct millisecond, so the new object lands on a new path
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let second = profiles
        .update_avatar(&anna, ImageUpload::new(fake_image_bytes(), "image/jpeg"))
        .await
        .unwrap();
    let second_url = second.avatar_url.clone().unwrap();

    assert_ne!(first_url, second_url);
    assert_eq!(world.blobs.object_count(), 1);
    let path = world.blobs.paths().pop().unwrap();
    assert!(path.starts_with(&format!("avatars/{}/avatar-", anna.user_id())));
    assert!(path.ends_with(".jpg"));
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_zero_star_submission_issues_no_write() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Computer help").await;
    OfferService::new(&world.ctx)
        .complete_offer(&anna, offer.id)
        .await
        .unwrap();

    let mut form = ReviewForm {
        stars: 0,
        comment: Some("forgot to pick stars".to_string()),
    };
    let err = ReviewService::new(&world.ctx)
        .submit(&ben, &mut form, offer.id, anna.user_id())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NoStarsSelected)
    ));
    assert_eq!(world.store.review_count(), 0);
    // A failed submit leaves the form as typed
    assert_eq!(form.comment.as_deref(), Some("forgot to pick stars"));
}

#[tokio::test]
async fn test_review_eligibility_follows_completion() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Tutoring").await;

    let reviews = ReviewService::new(&world.ctx);
    assert!(!reviews.can_review(&ben, offer.id).await.unwrap());
    // Owners never rate their own listing
    assert!(!reviews.can_review(&anna, offer.id).await.unwrap());

    OfferService::new(&world.ctx)
        .complete_offer(&anna, offer.id)
        .await
        .unwrap();

    assert!(reviews.can_review(&ben, offer.id).await.unwrap());
    assert!(!reviews.can_review(&anna, offer.id).await.unwrap());
}

#[tokio::test]
async fn test_pending_reviews_track_unreviewed_completed_swaps() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;
    let offer = world.post_offer(&anna, "Moving help").await;
    world.contact(&ben, offer.id).await;

    let reviews = ReviewService::new(&world.ctx);
    assert!(reviews.pending_reviews(&ben).await.unwrap().is_empty());

    OfferService::new(&world.ctx)
        .complete_offer(&anna, offer.id)
        .await
        .unwrap();

    let pending = reviews.pending_reviews(&ben).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].offer.id, offer.id);
    assert_eq!(pending[0].counterpart.id, anna.user_id());

    let between = reviews
        .reviewable_services(&ben, anna.user_id())
        .await
        .unwrap();
    assert_eq!(between.len(), 1);

    let mut form = ReviewForm {
        stars: 5,
        comment: None,
    };
    reviews
        .submit(&ben, &mut form, offer.id, anna.user_id())
        .await
        .unwrap();

    assert!(reviews.pending_reviews(&ben).await.unwrap().is_empty());
    assert!(reviews
        .reviewable_services(&ben, anna.user_id())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_profile_shows_three_newest_reviews() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let offers = OfferService::new(&world.ctx);
    let reviews = ReviewService::new(&world.ctx);

    for (i, name) in ["ben", "cara", "dan", "erin"].iter().enumerate() {
        let reviewer = world.member(name).await;
        let offer = world.post_offer(&anna, &format!("Skill {i}")).await;
        offers.complete_offer(&anna, offer.id).await.unwrap();

        let mut form = ReviewForm {
            stars: (i as i16 % 5) + 1,
            comment: Some(format!("review {i}")),
        };
        reviews
            .submit(&reviewer, &mut form, offer.id, anna.user_id())
            .await
            .unwrap();
    }

    let recent = ProfileService::new(&world.ctx)
        .recent_reviews(anna.user_id())
        .await
        .unwrap();
    assert_eq!(recent.len(), 3);
    // Newest first
    assert_eq!(recent[0].review.comment.as_deref(), Some("review 3"));
    assert_eq!(recent[0].reviewer_name.as_deref(), Some("erin"));
    assert_eq!(recent[2].review.comment.as_deref(), Some("review 1"));

    let summary = ProfileService::new(&world.ctx)
        .rating(anna.user_id())
        .await
        .unwrap();
    assert_eq!(summary.total_reviews, 4);
}

#[tokio::test]
async fn test_missing_offer_rejected_before_review_write() {
    let world = TestWorld::new();
    let anna = world.member("anna").await;
    let ben = world.member("ben").await;

    let mut form = ReviewForm {
        stars: 3,
        comment: None,
    };
    let err = ReviewService::new(&world.ctx)
        .submit(&ben, &mut form, Uuid::new_v4(), anna.user_id())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { .. }));
    assert_eq!(world.store.review_count(), 0);
}
