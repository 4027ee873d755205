pub mod app;
pub mod clock;
pub mod graphics;
pub mod pacing;
pub mod pixels_renderer;
pub mod surface;

/// Pure game logic that can be stepped without a window.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` one input at a time, keeping only the latest state.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn into_state(self) -> G::State {
        self.state
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        for input in inputs {
            self.step(input);
        }
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Additive;

    impl GameLogic for Additive {
        type State = i32;
        type Input = i32;

        fn initial_state(&self) -> Self::State {
            0
        }

        fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
            *state + input
        }
    }

    #[test]
    fn runner_starts_at_frame_zero_with_initial_state() {
        let runner = HeadlessRunner::new(Additive);
        assert_eq!(runner.frame(), 0);
        assert_eq!(runner.state(), &0);
    }

    #[test]
    fn runner_steps_through_inputs_in_order() {
        let mut runner = HeadlessRunner::new(Additive);
        assert_eq!(runner.step(5), 1);
        assert_eq!(runner.run([1, 2, 3]), 4);
        assert_eq!(runner.state(), &11);
        assert_eq!(runner.into_state(), 11);
    }
}
