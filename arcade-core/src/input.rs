/// Keys the arcade cares about. Everything else is ignored at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
}

/// Raw event delivered by an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Click,
    /// Player asked to abandon the session.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Key(Key),
    Click,
}

/// A qualifying response won by the response race. Absent on timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEvent {
    pub kind: ResponseKind,
    /// Elapsed ms from stimulus onset to the response.
    pub reaction_ms: u32,
}
