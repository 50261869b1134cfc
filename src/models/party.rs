//! Travel party roster

use serde::{Deserialize, Serialize};

/// A single traveler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    pub id: u32,
    pub age: u32,
    #[serde(default)]
    pub gender: String,
}

/// Reasons a roster change is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterChange {
    Applied,
    /// Removing this member would leave the party empty
    LastMember,
    NotFound,
    /// Age must be a positive integer
    InvalidAge,
    /// The party is at its configured maximum
    PartyFull,
}

/// Travelers on the trip; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyRoster {
    members: Vec<PartyMember>,
    next_id: u32,
}

impl Default for PartyRoster {
    fn default() -> Self {
        Self::new(30, "")
    }
}

impl PartyRoster {
    /// Create a roster with its first member
    pub fn new<S: Into<String>>(age: u32, gender: S) -> Self {
        Self {
            members: vec![PartyMember {
                id: 1,
                age: age.max(1),
                gender: gender.into(),
            }],
            next_id: 2,
        }
    }

    /// Rebuild a roster from persisted members, falling back to one default member
    #[must_use]
    pub fn from_members(members: Vec<PartyMember>) -> Self {
        if members.is_empty() {
            return Self::default();
        }
        let next_id = members.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self { members, next_id }
    }

    pub fn add<S: Into<String>>(&mut self, age: u32, gender: S) -> RosterChange {
        if age == 0 {
            return RosterChange::InvalidAge;
        }
        self.members.push(PartyMember {
            id: self.next_id,
            age,
            gender: gender.into(),
        });
        self.next_id += 1;
        RosterChange::Applied
    }

    pub fn remove(&mut self, id: u32) -> RosterChange {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            return RosterChange::NotFound;
        };
        if self.members.len() == 1 {
            return RosterChange::LastMember;
        }
        self.members.remove(index);
        RosterChange::Applied
    }

    pub fn update_age(&mut self, id: u32, age: u32) -> RosterChange {
        if age == 0 {
            return RosterChange::InvalidAge;
        }
        match self.members.iter_mut().find(|m| m.id == id) {
            Some(member) => {
                member.age = age;
                RosterChange::Applied
            }
            None => RosterChange::NotFound,
        }
    }

    #[must_use]
    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_remove_last_member() {
        let mut roster = PartyRoster::new(34, "female");
        assert_eq!(roster.remove(1), RosterChange::LastMember);
        assert_eq!(roster.len(), 1);
        assert!(!roster.is_empty());
    }

    #[test]
    fn test_restoring_no_members_keeps_one_traveler() {
        let roster = PartyRoster::from_members(Vec::new());
        assert_eq!(roster.len(), 1);
        assert!(!roster.is_empty());
    }

    #[test]
    fn test_add_and_remove_members() {
        let mut roster = PartyRoster::default();
        assert_eq!(roster.add(8, "male"), RosterChange::Applied);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.remove(1), RosterChange::Applied);
        assert_eq!(roster.members()[0].age, 8);
        assert_eq!(roster.remove(99), RosterChange::NotFound);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut roster = PartyRoster::default();
        roster.add(40, "");
        roster.remove(2);
        roster.add(41, "");
        assert_eq!(roster.members()[1].id, 3);
    }

    #[test]
    fn test_zero_age_rejected() {
        let mut roster = PartyRoster::default();
        assert_eq!(roster.add(0, ""), RosterChange::InvalidAge);
        assert_eq!(roster.update_age(1, 0), RosterChange::InvalidAge);
    }

    #[test]
    fn test_from_empty_members_keeps_one() {
        let roster = PartyRoster::from_members(vec![]);
        assert_eq!(roster.len(), 1);
    }
}
