use std::fmt;

use crate::ast::Operator;

/// What happened to a stack during one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceAction {
    /// An item was pushed onto the stack.
    Push {
        /// The pushed item as text.
        item: String,
    },
    /// The shunting-yard appended a token to its output.
    Output {
        /// The emitted token as text.
        item: String,
    },
    /// An operator consumed operands and produced a result.
    Apply {
        /// The applied operator.
        operator: Operator,
        /// The consumed operands, leftmost first.
        operands: Vec<String>,
        /// The produced value or expression fragment.
        result:   String,
    },
}

/// One step of a conversion or evaluation together with the state of the
/// affected stack right after the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// The step taken.
    pub action: TraceAction,
    /// Contents of the affected stack (or output), bottom first.
    pub stack:  Vec<String>,
}

impl TraceEvent {
    pub(crate) fn push(item: impl fmt::Display, stack: Vec<String>) -> Self {
        Self { action: TraceAction::Push { item: item.to_string() },
               stack }
    }

    pub(crate) fn output(item: impl fmt::Display, stack: Vec<String>) -> Self {
        Self { action: TraceAction::Output { item: item.to_string() },
               stack }
    }

    pub(crate) fn apply(operator: Operator,
                        operands: Vec<String>,
                        result: impl fmt::Display,
                        stack: Vec<String>)
                        -> Self {
        Self { action: TraceAction::Apply { operator,
                                            operands,
                                            result: result.to_string() },
               stack }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack = self.stack.join(", ");
        match &self.action {
            TraceAction::Push { item } => write!(f, "Push {item} -> Stack: [{stack}]"),
            TraceAction::Output { item } => write!(f, "Output {item} -> Output: [{stack}]"),
            TraceAction::Apply { operator,
                                 operands,
                                 result, } => write!(f,
                                                     "Apply {operator} to {} -> Result: {result} -> Stack: [{stack}]",
                                                     operands.join(", ")),
        }
    }
}

/// Receives the steps of a traced conversion or evaluation.
///
/// A sink only ever sees the events of a call that succeeded, delivered in
/// order once the call is complete.
///
/// # Example
/// ```
/// use notation::{
///     ast::Notation,
///     interpreter::{
///         lexer::{OperatorSet, tokenize},
///         converter::core::convert_traced,
///         trace::TraceEvent,
///     },
/// };
///
/// let tokens = tokenize("ab+", OperatorSet::Arithmetic).unwrap();
/// let mut steps: Vec<TraceEvent> = Vec::new();
/// convert_traced(&tokens, Notation::Postfix, Notation::Infix, &mut steps).unwrap();
///
/// assert_eq!(steps.len(), 3);
/// assert_eq!(steps[2].to_string(), "Apply + to a, b -> Result: (a+b) -> Stack: [(a+b)]");
/// ```
pub trait TraceSink {
    /// Records one step.
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Collects events for an optional sink during a single call.
///
/// Without a sink the event closures are never run, so untraced calls build
/// no snapshots at all. Events are held back until [`Tracer::commit`], which
/// keeps failed calls from leaking a partial trace.
pub(crate) struct Tracer<'a> {
    sink:    Option<&'a mut dyn TraceSink>,
    pending: Vec<TraceEvent>,
}

impl<'a> Tracer<'a> {
    pub(crate) const fn disabled() -> Self {
        Self { sink:    None,
               pending: Vec::new(), }
    }

    pub(crate) fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self { sink:    Some(sink),
               pending: Vec::new(), }
    }

    pub(crate) const fn enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub(crate) fn emit(&mut self, event: impl FnOnce() -> TraceEvent) {
        if self.sink.is_some() {
            self.pending.push(event());
        }
    }

    pub(crate) fn commit(self) {
        if let Some(sink) = self.sink {
            for event in self.pending {
                sink.record(event);
            }
        }
    }
}

/// Renders a stack bottom first, one string per entry.
pub(crate) fn snapshot<T: fmt::Display>(stack: &[T]) -> Vec<String> {
    stack.iter().map(ToString::to_string).collect()
}
