//! End-to-end flows across the kernel: build envelopes, push them through
//! the dispatcher, and check the decoded records against what was authored.

use subspace_kernel::registry::{
    DEFAULT_SUBSPACE_OPS, KIND_GOVERNANCE_VOTE, KIND_OPEN_RESEARCH_READ_PAPER, SOCIAL_SUBSPACE_OPS,
};
use subspace_kernel::{
    calculate_subspace_id, parse_subspace_event, Action, CausalityKey, CommentEvent, Envelope,
    GovernanceEvent, OpsError, PostEvent, SocialEvent, SubspaceCreateEvent, SubspaceEvent,
    SubspaceJoinEvent, SubspaceKeys, SubspaceOp, Tag, VoteEvent,
};

fn governance_subspace() -> SubspaceCreateEvent {
    SubspaceCreateEvent::new(
        "test-subspace",
        DEFAULT_SUBSPACE_OPS,
        "energy>1000",
        "Test Subspace",
        "https://example.com/image.png",
    )
}

#[test]
fn create_join_post_vote_lifecycle() {
    let create = governance_subspace();
    create.validate().expect("creation validates");

    // Anyone can recompute the id from the declared configuration.
    assert_eq!(
        create.subspace_id,
        calculate_subspace_id("test-subspace", DEFAULT_SUBSPACE_OPS, "energy>1000")
    );

    let join = SubspaceJoinEvent::new(&create.subspace_id);
    let joined = parse_subspace_event(join.envelope.clone()).expect("join decodes");
    assert_eq!(joined.subspace_id(), create.subspace_id);

    let mut post = PostEvent::new(&create.subspace_id).unwrap();
    post.set_content_type("markdown");
    post.op.set_auth(Action::READ | Action::WRITE, 30300, 1000);
    post.op.envelope.content = "hello subspace".into();

    let decoded = parse_subspace_event(post.op.envelope.clone()).expect("post decodes");
    let SubspaceEvent::Governance(GovernanceEvent::Post(decoded)) = decoded else {
        panic!("expected governance post");
    };
    assert_eq!(decoded.subspace_id(), create.subspace_id);
    assert_eq!(decoded.content_type, "markdown");
    assert_eq!(decoded.content(), "hello subspace");

    let auth = decoded.auth().expect("auth present");
    assert!(auth.has_permission(Action::READ));
    assert!(auth.has_permission(Action::WRITE));
    assert!(!auth.has_permission(Action::EXECUTE));
    assert!(!auth.is_expired(999));
    assert!(auth.is_expired(1000));

    let mut vote = VoteEvent::new(&create.subspace_id).unwrap();
    vote.set_vote("prop-1", "yes");
    vote.op.set_parents(vec!["f00dbabe".into()]);

    let decoded = parse_subspace_event(vote.op.envelope.clone()).expect("vote decodes");
    let SubspaceEvent::Governance(GovernanceEvent::Vote(decoded)) = decoded else {
        panic!("expected governance vote");
    };
    assert_eq!(decoded.vote, "yes");
    assert_eq!(decoded.envelope().kind, KIND_GOVERNANCE_VOTE);
}

#[test]
fn accepting_process_tracks_causality_per_key() {
    let mut clock = SubspaceKeys::new(1);
    clock.add_key(CausalityKey::new(30300, 0));
    clock.add_key(CausalityKey::new(30302, 0));

    // Accept a post authorized under key 30300 and advance only its counter.
    clock.update_counter(30300, 1);
    assert_eq!(clock.get_key(30300).unwrap().counter, 1);
    assert_eq!(clock.get_key(30302).unwrap().counter, 0);

    // Counters are independent scalars: advancing one says nothing about
    // the other.
    clock.update_counter(30302, 7);
    assert_eq!(clock.get_key(30300).unwrap().counter, 1);
    assert_eq!(clock.get_key(30302).unwrap().counter, 7);

    // An auth tag expiring at 5 is already expired under key 30302's clock.
    let auth = subspace_kernel::AuthTag::new(Action::WRITE, 30302, 5);
    assert!(auth.is_expired(clock.get_key(30302).unwrap().counter));
    assert!(!auth.is_expired(clock.get_key(30300).unwrap().counter));
}

#[test]
fn malformed_auth_tag_rejects_the_whole_envelope() {
    let create = governance_subspace();
    let mut post = PostEvent::new(&create.subspace_id).unwrap();
    post.set_content_type("markdown");
    post.op
        .envelope
        .push_tag(Tag::pair("auth", "action=1,key=30300"));

    let err = parse_subspace_event(post.op.envelope.clone()).unwrap_err();
    assert!(matches!(err, OpsError::Core(_)), "got {err:?}");
}

#[test]
fn unknown_kind_yields_no_partial_record() {
    let mut envelope = Envelope::skeleton(42_000, 0);
    envelope.push_tag(Tag::pair("sid", "0xabc"));
    assert_eq!(
        parse_subspace_event(envelope),
        Err(OpsError::UnknownKind(42_000))
    );
}

#[test]
fn reserved_kind_without_decoder_is_unknown_operation() {
    let envelope = Envelope::skeleton(KIND_OPEN_RESEARCH_READ_PAPER, 0);
    assert_eq!(
        parse_subspace_event(envelope),
        Err(OpsError::UnknownOperation("read_paper".into()))
    );
}

#[test]
fn parents_accumulate_across_separate_tags() {
    let create = SubspaceCreateEvent::new("social", SOCIAL_SUBSPACE_OPS, "", "Social space", "");
    let mut comment = CommentEvent::new(&create.subspace_id).unwrap();
    comment.set_comment_info("obj-1", "alice", "root-comment");
    comment.op.set_parents(vec!["e1".into(), "e2".into()]);

    let decoded = parse_subspace_event(comment.op.envelope.clone()).unwrap();
    let SubspaceEvent::Social(SocialEvent::Comment(decoded)) = decoded else {
        panic!("expected comment");
    };
    // The payload `parent` tag and the `parent` list tag both contribute,
    // in encounter order.
    assert_eq!(decoded.parents(), [
        "root-comment".to_string(),
        "e1".to_string(),
        "e2".to_string(),
    ]);
}

#[test]
fn repeated_sid_resolves_to_last_occurrence() {
    let create = governance_subspace();
    let mut post = PostEvent::new(&create.subspace_id).unwrap();
    let other_sid = calculate_subspace_id("other", DEFAULT_SUBSPACE_OPS, "");
    post.op.envelope.push_tag(Tag::pair("sid", other_sid.clone()));

    let decoded = parse_subspace_event(post.op.envelope.clone()).unwrap();
    assert_eq!(decoded.subspace_id(), other_sid);
}

#[test]
fn decoding_never_mutates_the_envelope() {
    let create = governance_subspace();
    let mut post = PostEvent::new(&create.subspace_id).unwrap();
    post.set_content_type("markdown");
    post.op.set_auth(Action::WRITE, 30300, 9);

    let before = post.op.envelope.clone();
    let _ = parse_subspace_event(post.op.envelope.clone()).unwrap();
    assert_eq!(post.op.envelope, before);
}
