//! Sequential per-player polling.
//!
//! Many effects ask every player in some order ("each opponent may...",
//! "each player secretly chooses..."). A `PlayerPoll` is the shared shape of
//! those frames: the player being asked now, the queue still to ask, and
//! the answers collected so far. The per-player question is supplied as a
//! closure so each family decides for itself when to skip a player or
//! answer on their behalf. Aggregation runs once, after the last answer.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::decisions::Decision;

/// What to do with one player in the queue.
#[derive(Clone, Debug, PartialEq)]
pub enum Ask<A> {
    /// Ask the player.
    Decide(Decision),
    /// Leave the player out entirely.
    Skip,
    /// Record an answer without asking (no real choice to make).
    Answer(A),
}

/// Result of advancing a poll.
#[derive(Clone, Debug, PartialEq)]
pub enum PollStep<A: Clone> {
    /// Stop and ask `poll.current`.
    Ask { poll: PlayerPoll<A>, decision: Decision },
    /// Every player handled; answers in polling order.
    Done(Vector<(PlayerId, A)>),
}

/// In-flight poll state, stored inside a continuation frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPoll<A: Clone> {
    /// The player whose answer is pending.
    pub current: PlayerId,
    /// Players not yet asked, in order.
    pub remaining: Vector<PlayerId>,
    /// Answers so far, in polling order.
    pub answers: Vector<(PlayerId, A)>,
}

impl<A: Clone> PlayerPoll<A> {
    /// Start polling `players` in the given order.
    pub fn start(
        players: impl IntoIterator<Item = PlayerId>,
        ask: impl FnMut(PlayerId, &Vector<(PlayerId, A)>) -> Ask<A>,
    ) -> PollStep<A> {
        Self::advance(players.into_iter().collect(), Vector::new(), ask)
    }

    /// Record the pending player's answer and move to the next player.
    pub fn answer(
        self,
        answer: A,
        ask: impl FnMut(PlayerId, &Vector<(PlayerId, A)>) -> Ask<A>,
    ) -> PollStep<A> {
        let mut answers = self.answers;
        answers.push_back((self.current, answer));
        Self::advance(self.remaining, answers, ask)
    }

    /// Ask the pending player again with a different question.
    ///
    /// Used by multi-stage families where one player answers twice.
    #[must_use]
    pub fn reask(self, decision: Decision) -> PollStep<A> {
        PollStep::Ask { poll: self, decision }
    }

    /// Answer already given by `player`, if any.
    #[must_use]
    pub fn answer_of(&self, player: PlayerId) -> Option<&A> {
        self.answers.iter().find(|(p, _)| *p == player).map(|(_, a)| a)
    }

    fn advance(
        mut remaining: Vector<PlayerId>,
        mut answers: Vector<(PlayerId, A)>,
        mut ask: impl FnMut(PlayerId, &Vector<(PlayerId, A)>) -> Ask<A>,
    ) -> PollStep<A> {
        while let Some(player) = remaining.pop_front() {
            match ask(player, &answers) {
                Ask::Decide(decision) => {
                    return PollStep::Ask {
                        poll: PlayerPoll { current: player, remaining, answers },
                        decision,
                    };
                }
                Ask::Skip => {}
                Ask::Answer(answer) => answers.push_back((player, answer)),
            }
        }
        PollStep::Done(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decisions::DecisionKind;

    fn yes_no(player: PlayerId) -> Ask<bool> {
        Ask::Decide(Decision::new(player, DecisionKind::YesNo, "?"))
    }

    #[test]
    fn test_asks_in_order() {
        let players = PlayerId::turn_order_from(PlayerId::new(1), 3);
        let PollStep::Ask { poll, decision } = PlayerPoll::start(players, |p, _| yes_no(p)) else {
            panic!("expected a question");
        };
        assert_eq!(decision.player, PlayerId::new(1));
        assert_eq!(poll.remaining.len(), 2);

        let PollStep::Ask { poll, decision } = poll.answer(true, |p, _| yes_no(p)) else {
            panic!("expected a question");
        };
        assert_eq!(decision.player, PlayerId::new(2));
        assert_eq!(poll.answer_of(PlayerId::new(1)), Some(&true));

        let PollStep::Ask { poll, .. } = poll.answer(false, |p, _| yes_no(p)) else {
            panic!("expected a question");
        };
        let PollStep::Done(answers) = poll.answer(true, |p, _| yes_no(p)) else {
            panic!("expected completion");
        };
        let order: Vec<_> = answers.iter().map(|(p, _)| p.0).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_skip_and_default() {
        let step = PlayerPoll::start(PlayerId::all(3), |p, _| match p.0 {
            0 => Ask::Skip,
            1 => Ask::Answer(7u32),
            _ => Ask::Answer(9),
        });
        let PollStep::Done(answers) = step else {
            panic!("no one should be asked");
        };
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0], (PlayerId::new(1), 7));
    }

    #[test]
    fn test_empty_poll() {
        let step = PlayerPoll::<u32>::start(std::iter::empty(), |_, _| Ask::Skip);
        assert!(matches!(step, PollStep::Done(ref a) if a.is_empty()));
    }
}
