use crate::RouteNote;

/// Note history for a single RouteChat call.
///
/// Every received note is appended in arrival order. When a new note
/// arrives, all earlier notes sent from the same location are echoed back,
/// the sender's own included; message text plays no part in matching.
///
/// A session is owned by exactly one call and dropped with it, so notes
/// never leak between concurrent chats.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    history: Vec<RouteNote>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `note` and returns the earlier notes at its location, oldest
    /// first.
    pub fn receive(&mut self, note: RouteNote) -> Vec<RouteNote> {
        let echoes = self.history_at(&note).cloned().collect();
        self.history.push(note);
        echoes
    }

    /// Earlier notes at the same location as `note`, without recording it.
    pub fn history_at<'a>(
        &'a self,
        note: &RouteNote,
    ) -> impl Iterator<Item = &'a RouteNote> + use<'a> {
        let location = note.location;
        self.history
            .iter()
            .filter(move |prev| prev.location == location)
    }

    pub fn history(&self) -> &[RouteNote] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn note(message: &str, latitude: i32, longitude: i32) -> RouteNote {
        RouteNote::new(Point::new(latitude, longitude), message)
    }

    #[test]
    fn echoes_only_prior_notes_at_the_same_location() {
        let mut session = ChatSession::new();

        assert!(session.receive(note("N1", 0, 0)).is_empty());
        assert!(session.receive(note("N2", 0, 1)).is_empty());
        assert_eq!(session.receive(note("N3", 0, 0)), vec![note("N1", 0, 0)]);
    }

    #[test]
    fn echoes_keep_arrival_order_and_include_self_echo() {
        let mut session = ChatSession::new();
        let messages = [
            note("First message", 0, 0),
            note("Second message", 0, 1),
            note("Third message", 1, 0),
            note("Fourth message", 0, 0),
            note("Fifth message", 1, 0),
        ];

        let echoes: Vec<Vec<RouteNote>> = messages
            .iter()
            .cloned()
            .map(|n| session.receive(n))
            .collect();

        assert!(echoes[0].is_empty());
        assert!(echoes[1].is_empty());
        assert!(echoes[2].is_empty());
        assert_eq!(echoes[3], vec![note("First message", 0, 0)]);
        assert_eq!(echoes[4], vec![note("Third message", 1, 0)]);

        // The same sender repeating itself is echoed too.
        let again = session.receive(note("First message", 0, 0));
        assert_eq!(
            again,
            vec![note("First message", 0, 0), note("Fourth message", 0, 0)]
        );
    }

    #[test]
    fn history_is_append_only() {
        let mut session = ChatSession::new();
        session.receive(note("a", 5, 5));
        session.receive(note("b", 5, 5));
        session.receive(note("c", 6, 6));

        let messages: Vec<_> = session.history().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["a", "b", "c"]);
        assert_eq!(session.history_at(&note("probe", 5, 5)).count(), 2);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn sessions_do_not_share_history() {
        let mut a = ChatSession::new();
        let mut b = ChatSession::new();

        a.receive(note("from a", 0, 0));
        assert!(b.receive(note("from b", 0, 0)).is_empty());
        assert_eq!(a.receive(note("a again", 0, 0)), vec![note("from a", 0, 0)]);
    }
}
