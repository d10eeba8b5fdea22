use super::TerminationCondition;

/// Stops a pass as soon as either of two conditions asks for it; both conditions are told about
/// every finished level.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> Combinator<First, Second> {
    pub fn new(first: First, second: Second) -> Self {
        Combinator { first, second }
    }
}

impl<First: TerminationCondition, Second: TerminationCondition> TerminationCondition
    for Combinator<First, Second>
{
    fn should_stop(&mut self) -> bool {
        self.first.should_stop() || self.second.should_stop()
    }

    fn level_has_been_explored(&mut self) {
        self.first.level_has_been_explored();
        self.second.level_has_been_explored();
    }
}
