//! # Subspace Kernel Ops
//!
//! Typed subspace operations over the core primitives: the common operation
//! header, the subspace lifecycle operations, and the builtin payload
//! modules.
//!
//! Decoding follows one shape everywhere: a single pass collects the common
//! tags (`sid`, `auth`, `parent`), the envelope kind resolves through the
//! registry, and the owning module's decoder scans its own field tags and
//! returns a fully populated record or an error. There is no partial
//! success.
//!
//! Building mirrors it: each record starts from a skeleton envelope carrying
//! the marker tags, and every setter appends its tag. Setters never replace
//! prior tags; decoders resolve repeats to the last occurrence.

pub mod common_graph;
pub mod community;
pub mod error;
pub mod governance;
pub mod model_graph;
pub mod op;
pub mod open_research;
pub mod social;
pub mod subspace;

pub use common_graph::{
    parse_common_graph_event, CommonGraphEvent, EntityEvent, ObservationEvent, ProjectEvent,
    RelationEvent, TaskEvent,
};
pub use community::{
    parse_community_event, ChannelCreateEvent, ChannelMessageEvent, CommunityCreateEvent,
    CommunityEvent, CommunityInviteEvent,
};
pub use error::OpsError;
pub use governance::{
    parse_governance_event, GovernanceEvent, InviteEvent, MintEvent, PostEvent, ProposeEvent,
    VoteEvent,
};
pub use model_graph::{
    parse_model_graph_event, AlgoEvent, ComputeEvent, ConversationEvent, DatasetEvent,
    FinetuneEvent, ModelEvent, ModelGraphEvent, SessionEvent, ValidEvent,
};
pub use op::{SubspaceOp, SubspaceOpEnvelope, SUBSPACE_OP_MARKER, TAG_AUTH, TAG_D, TAG_OP, TAG_PARENT, TAG_SID};
pub use open_research::{
    parse_open_research_event, AiAnalysisEvent, AnnotationEvent, DiscussionEvent, OpenResearchEvent,
    PaperEvent, ReviewEvent,
};
pub use social::{
    parse_social_event, CollectEvent, CommentEvent, FollowEvent, LikeEvent, MessageEvent,
    QuestionEvent, RoomEvent, ShareEvent, SocialEvent, TagEvent, UnfollowEvent,
};
pub use subspace::{SubspaceCreateEvent, SubspaceJoinEvent};
