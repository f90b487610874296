use crate::domain::model::{Assignment, Participant};
use crate::utils::error::{Result, SantaError};
use rand::Rng;
use std::collections::HashSet;

pub const MIN_PARTICIPANTS: usize = 2;

/// 以執行緒本地亂數產生器產生分配
pub fn assign(participants: &[Participant]) -> Result<Vec<Assignment>> {
    assign_with_rng(participants, &mut rand::rng())
}

/// Builds a derangement in one forward pass over `participants`.
///
/// Each giver draws uniformly from the pool of recipients not yet taken,
/// skipping themself. When the last giver is left with only themself in the
/// pool, the previous assignment is rotated: the previous giver now gives to
/// the last giver, and the last giver takes the previous recipient.
///
/// Identities are assumed distinct; the caller validates that.
pub fn assign_with_rng<R: Rng>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(SantaError::InsufficientParticipants {
            count: participants.len(),
        });
    }

    // 候選池以索引表示，不動到呼叫端的資料
    let mut pool: Vec<usize> = (0..participants.len()).collect();
    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(participants.len());

    for (giver_idx, giver) in participants.iter().enumerate() {
        let candidates: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&idx| !participants[idx].same_identity(giver))
            .collect();

        if candidates.is_empty() {
            let Some((prev_giver, prev_recipient)) = pairs.pop() else {
                return Err(SantaError::DuplicateEmail {
                    email: giver.email.clone(),
                });
            };
            tracing::debug!(
                giver = giver_idx,
                "Only self left in pool, rotating previous assignment"
            );
            pairs.push((prev_giver, giver_idx));
            pairs.push((giver_idx, prev_recipient));
            continue;
        }

        let picked = candidates[rng.random_range(0..candidates.len())];
        pool.retain(|&idx| !participants[idx].same_identity(&participants[picked]));
        pairs.push((giver_idx, picked));
    }

    Ok(pairs
        .into_iter()
        .map(|(giver, recipient)| Assignment {
            giver: participants[giver].clone(),
            recipient: participants[recipient].clone(),
        })
        .collect())
}

/// Checks that `assignments` is a derangement of `participants`: one entry
/// per participant, each appearing once as giver and once as recipient, and
/// nobody assigned to themself.
pub fn is_derangement(participants: &[Participant], assignments: &[Assignment]) -> bool {
    if assignments.len() != participants.len() {
        return false;
    }

    let expected: HashSet<String> = participants.iter().map(Participant::identity).collect();
    if expected.len() != participants.len() {
        return false;
    }

    let mut givers = HashSet::with_capacity(assignments.len());
    let mut recipients = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        if assignment.giver.same_identity(&assignment.recipient) {
            return false;
        }
        if !givers.insert(assignment.giver.identity())
            || !recipients.insert(assignment.recipient.identity())
        {
            return false;
        }
    }

    givers == expected && recipients == expected
}
