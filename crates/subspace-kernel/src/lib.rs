//! # Subspace Kernel
//!
//! The unified API for the subspace operation layer: capability tokens,
//! causality tracking, content-addressed subspace identity, and typed
//! operations over a signed-event substrate.
//!
//! ## Overview
//!
//! Independently developed operation modules share one numeric kind space.
//! This crate ties them together:
//!
//! - **AuthTag**: a compact permission+expiry credential bound to a
//!   causality key and a logical clock
//! - **SubspaceKeys**: independent Lamport-style counters per authorization
//!   scope
//! - **Subspace identity**: `0x`-prefixed SHA-256 of the declared
//!   configuration, recomputable by any verifier
//! - **Registry**: the union of all modules' kind↔operation entries
//! - **Dispatch**: raw envelope in, typed operation record (or one error)
//!   out
//!
//! The signed envelope itself is an external collaborator: construction of
//! signatures, transport, and persistence all live outside this workspace.
//!
//! ## Usage
//!
//! ```rust
//! use subspace_kernel::{parse_subspace_event, Action, PostEvent, SubspaceCreateEvent};
//! use subspace_kernel::registry::DEFAULT_SUBSPACE_OPS;
//!
//! // Declare a subspace; its id derives from the declared configuration.
//! let create = SubspaceCreateEvent::new(
//!     "rust-guild",
//!     DEFAULT_SUBSPACE_OPS,
//!     "energy>1000",
//!     "A guild for collaborative work",
//!     "",
//! );
//! create.validate().unwrap();
//!
//! // Author a post inside it, carrying a write capability that expires at
//! // logical clock 1000.
//! let mut post = PostEvent::new(&create.subspace_id).unwrap();
//! post.set_content_type("markdown");
//! post.op.set_auth(Action::WRITE, 30300, 1000);
//!
//! // Any holder of the raw envelope decodes the same typed record.
//! let event = parse_subspace_event(post.op.envelope.clone()).unwrap();
//! assert_eq!(event.subspace_id(), create.subspace_id);
//! ```
//!
//! ## Re-exports
//!
//! The component crates are re-exported for convenience:
//!
//! - [`registry`] - kind numbers, operation names, and the registry
//! - [`schema`] - the module declaration contract for new modules

pub mod dispatch;

pub use dispatch::{parse_subspace_event, SubspaceEvent};

pub use subspace_kernel_core::registry;
pub use subspace_kernel_core::schema;
pub use subspace_kernel_core::{
    calculate_subspace_id, get_kind, get_operation, validate_subspace_id, Action, AuthTag,
    CausalityKey, CoreError, Envelope, KindRegistry, SubspaceKeys, Tag,
};

pub use subspace_kernel_ops::{
    parse_common_graph_event, parse_community_event, parse_governance_event,
    parse_model_graph_event, parse_open_research_event, parse_social_event, OpsError, SubspaceOp,
    SubspaceOpEnvelope,
};

pub use subspace_kernel_ops::{
    AiAnalysisEvent, AlgoEvent, AnnotationEvent, ChannelCreateEvent, ChannelMessageEvent,
    CollectEvent, CommentEvent, CommonGraphEvent, CommunityCreateEvent, CommunityEvent,
    CommunityInviteEvent, ComputeEvent, ConversationEvent, DatasetEvent, DiscussionEvent,
    EntityEvent, FinetuneEvent, FollowEvent, GovernanceEvent, InviteEvent, LikeEvent, MessageEvent,
    MintEvent, ModelEvent, ModelGraphEvent, ObservationEvent, OpenResearchEvent, PaperEvent,
    PostEvent, ProjectEvent, ProposeEvent, QuestionEvent, RelationEvent, ReviewEvent, RoomEvent,
    SessionEvent, ShareEvent, SocialEvent, SubspaceCreateEvent, SubspaceJoinEvent, TagEvent,
    TaskEvent, UnfollowEvent, ValidEvent, VoteEvent,
};
