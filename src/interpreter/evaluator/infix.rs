use crate::{
    ast::Operator,
    error::{ParseError, RuntimeError},
    interpreter::{
        converter::shunting_yard::check_infix,
        evaluator::core::{Bindings, EvalMode, EvalResult, apply, resolve},
        lexer::Token,
        stack::{Scan, pop_operands},
        trace::{TraceEvent, Tracer, snapshot},
        value::core::Number,
    },
};

/// Pending operators and values of an infix evaluation.
struct Machine<'t, 'a> {
    values:    Vec<Number>,
    operators: Vec<Token>,
    mode:      EvalMode,
    tracer:    &'t mut Tracer<'a>,
}

impl Machine<'_, '_> {
    fn push_value(&mut self, value: Number) {
        self.values.push(value);
        self.tracer.emit(|| TraceEvent::push(value, snapshot(&self.values)));
    }

    /// Applies `operator` to the values on top of the value stack.
    fn reduce(&mut self, operator: Operator) -> EvalResult<()> {
        let operands = pop_operands(&mut self.values, operator, Scan::Postfix)?;
        let consumed = if self.tracer.enabled() {
            operands.describe()
        } else {
            Vec::new()
        };

        let result = apply(operator, operands, self.mode)?;
        self.values.push(result);
        self.tracer
            .emit(|| TraceEvent::apply(operator, consumed, result, snapshot(&self.values)));
        Ok(())
    }

    fn push_token(&mut self, token: Token) {
        self.operators.push(token);
        self.tracer.emit(|| {
                       let top = self.operators.last().map(ToString::to_string).unwrap_or_default();
                       TraceEvent::push(top, snapshot(&self.operators))
                   });
    }

    /// Applies stacked operators down to the innermost open parenthesis, which
    /// is removed.
    fn close_group(&mut self) -> EvalResult<()> {
        loop {
            match self.operators.pop() {
                Some(Token::LeftParen) => return Ok(()),
                Some(Token::Operator(operator)) => self.reduce(operator)?,
                _ => return Err(ParseError::MismatchedParentheses { found: ')' }.into()),
            }
        }
    }

    /// Applies every stacked operator that binds at least as tightly as
    /// `incoming`, then stacks `incoming`.
    fn push_operator(&mut self, incoming: Operator) -> EvalResult<()> {
        while let Some(Token::Operator(top)) = self.operators.last()
              && top.yields_to(incoming, true)
        {
            let top = *top;
            self.operators.pop();
            self.reduce(top)?;
        }
        self.push_token(Token::Operator(incoming));
        Ok(())
    }

    fn finish(mut self) -> EvalResult<Number> {
        while let Some(token) = self.operators.pop() {
            match token {
                Token::Operator(operator) => self.reduce(operator)?,
                _ => return Err(ParseError::MismatchedParentheses { found: '(' }.into()),
            }
        }

        match self.values.as_slice() {
            [value] => Ok(*value),
            rest => Err(RuntimeError::Parse(ParseError::InvalidExpression { depth: rest.len() })),
        }
    }
}

/// Evaluates an infix sequence with a value stack and an operator stack.
///
/// Operators are applied as soon as the shunting-yard would move them to its
/// output, so the precedence and grouping rules are exactly those of the
/// conversion to postfix. The sequence is checked with
/// [`check_infix`] before anything is applied.
///
/// Pushes onto either stack and operator applications are reported to
/// `tracer`.
pub(crate) fn evaluate_infix(tokens: &[Token],
                             bindings: &Bindings,
                             mode: EvalMode,
                             tracer: &mut Tracer<'_>)
                             -> EvalResult<Number> {
    check_infix(tokens)?;

    let mut machine = Machine { values:    Vec::new(),
                                operators: Vec::new(),
                                mode,
                                tracer };

    for token in tokens {
        match token {
            Token::Operand(operand) => machine.push_value(resolve(operand, bindings, mode)?),
            Token::LeftParen => machine.push_token(Token::LeftParen),
            Token::RightParen => machine.close_group()?,
            Token::Operator(operator) => machine.push_operator(*operator)?,
        }
    }

    machine.finish()
}
