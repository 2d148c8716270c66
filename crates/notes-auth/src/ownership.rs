use super::*;
use notes_core::ID;
use notes_core::Unique;

/// Ownership check shared by every per-resource route.
///
/// The anonymous caller owns nothing, not even a resource whose owner
/// key coincides with the sentinel's. Any refusal is
/// [`AuthError::Unauthorized`]; there is no separate forbidden outcome.
pub fn authorize(lurker: &Lurker, caller: &Identity, owner: ID<Member>) -> Result<(), AuthError> {
    match lurker.is(caller) || caller.id() != owner {
        true => Err(AuthError::Unauthorized),
        false => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64) -> Identity {
        let member = Member::new(
            format!("member{}", id),
            format!("member{}@example.com", id),
            Profile::default(),
        );
        Identity::from(member.assign(ID::from(id)))
    }

    #[test]
    fn owner_passes() {
        let lurker = Lurker::sentinel();
        assert!(authorize(&lurker, &member(3), ID::from(3)).is_ok());
    }

    #[test]
    fn stranger_is_refused() {
        let lurker = Lurker::sentinel();
        assert!(matches!(
            authorize(&lurker, &member(3), ID::from(4)),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn lurker_owns_nothing() {
        let lurker = Lurker::sentinel();
        let anonymous = lurker.identity();
        assert!(authorize(&lurker, &anonymous, anonymous.id()).is_err());
        assert!(authorize(&lurker, &anonymous, ID::from(1)).is_err());
    }
}
