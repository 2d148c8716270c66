use super::*;

/// The anonymous identity.
///
/// Built once at startup and handed to whatever needs a "nobody" default.
/// Anonymity is decided by allocation, not by field values: a member that
/// happens to have id 0 and empty fields is still not this lurker.
#[derive(Debug, Clone)]
pub struct Lurker(Identity);

impl Lurker {
    pub fn sentinel() -> Self {
        Self(Identity::from(Member::blank()))
    }
    pub fn identity(&self) -> Identity {
        self.0.clone()
    }
    pub fn is(&self, identity: &Identity) -> bool {
        self.0.same(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_core::Unique;

    #[test]
    fn recognizes_itself() {
        let lurker = Lurker::sentinel();
        assert!(lurker.is(&lurker.identity()));
        assert!(lurker.is(&lurker.clone().identity()));
    }

    #[test]
    fn lookalikes_are_not_anonymous() {
        let lurker = Lurker::sentinel();
        let lookalike = Identity::from(Member::blank());
        assert_eq!(lookalike.id(), lurker.identity().id());
        assert_eq!(lookalike.member(), lurker.identity().member());
        assert!(!lurker.is(&lookalike));
    }

    #[test]
    fn other_sentinels_are_strangers() {
        let a = Lurker::sentinel();
        let b = Lurker::sentinel();
        assert!(!a.is(&b.identity()));
    }
}
