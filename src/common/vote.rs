use super::newtypes::{PostId, UserId, VoteId};
use serde::{Deserialize, Serialize};

/// Stored as `1` for a like and `-1` for a dislike.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum VoteValue {
    Like,
    Dislike,
}

impl From<VoteValue> for i16 {
    fn from(value: VoteValue) -> Self {
        match value {
            VoteValue::Like => 1,
            VoteValue::Dislike => -1,
        }
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Like),
            -1 => Ok(VoteValue::Dislike),
            v => Err(format!("invalid vote value {v}")),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    pub id: VoteId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub vote: VoteValue,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CreateVoteParams {
    pub post_id: PostId,
    pub user_id: UserId,
    pub vote: VoteValue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub likes: usize,
    pub dislikes: usize,
    /// Vote of the signed in user, if any
    pub mine: Option<VoteValue>,
}

impl VoteTally {
    pub fn new(votes: &[Vote], user: Option<UserId>) -> Self {
        let count = |value| votes.iter().filter(|v| v.vote == value).count();
        VoteTally {
            likes: count(VoteValue::Like),
            dislikes: count(VoteValue::Dislike),
            mine: user.and_then(|u| votes.iter().find(|v| v.user_id == u).map(|v| v.vote)),
        }
    }
}

/// Row change needed to apply a click on `value`, given the user's existing vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    Insert(VoteValue),
    Update(VoteId, VoteValue),
    /// Clicking the same button again withdraws the vote
    Delete(VoteId),
}

impl VoteChange {
    pub fn plan(existing: Option<&Vote>, value: VoteValue) -> Self {
        match existing {
            None => VoteChange::Insert(value),
            Some(vote) if vote.vote == value => VoteChange::Delete(vote.id),
            Some(vote) => VoteChange::Update(vote.id, value),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use uuid::Uuid;

    fn vote(id: i64, user: u128, value: VoteValue) -> Vote {
        Vote {
            id: VoteId(id),
            post_id: PostId(1),
            user_id: UserId(Uuid::from_u128(user)),
            vote: value,
        }
    }

    #[test]
    fn test_tally() {
        let votes = [
            vote(1, 1, VoteValue::Like),
            vote(2, 2, VoteValue::Like),
            vote(3, 3, VoteValue::Dislike),
        ];
        let tally = VoteTally::new(&votes, Some(UserId(Uuid::from_u128(3))));
        assert_eq!(2, tally.likes);
        assert_eq!(1, tally.dislikes);
        assert_eq!(Some(VoteValue::Dislike), tally.mine);
        assert_eq!(None, VoteTally::new(&votes, None).mine);
    }

    #[test]
    fn test_plan_vote() {
        let like = vote(7, 1, VoteValue::Like);
        assert_eq!(
            VoteChange::Insert(VoteValue::Like),
            VoteChange::plan(None, VoteValue::Like)
        );
        assert_eq!(
            VoteChange::Delete(VoteId(7)),
            VoteChange::plan(Some(&like), VoteValue::Like)
        );
        assert_eq!(
            VoteChange::Update(VoteId(7), VoteValue::Dislike),
            VoteChange::plan(Some(&like), VoteValue::Dislike)
        );
    }

    #[test]
    fn test_vote_wire_format() -> Result<(), serde_json::Error> {
        let json = r#"{"id":1,"post_id":2,"user_id":"00000000-0000-0000-0000-000000000005","vote":-1}"#;
        let vote: Vote = serde_json::from_str(json)?;
        assert_eq!(VoteValue::Dislike, vote.vote);
        assert!(serde_json::from_str::<Vote>(&json.replace("-1}", "2}")).is_err());
        assert_eq!("1", serde_json::to_string(&VoteValue::Like)?);
        Ok(())
    }
}
