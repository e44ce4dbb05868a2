use gambit_core::{Move, Position};

use crate::evaluation::{Evaluator, MaterialEvaluator};
use crate::search::Search;
use crate::Agent;

/// Agent backed by fixed-depth alpha-beta search.
pub struct MinimaxAgent<E = MaterialEvaluator> {
    name: String,
    search: Search<E>,
}

impl MinimaxAgent<MaterialEvaluator> {
    /// A searcher over material evaluation.
    pub fn new(depth: u32) -> Self {
        Self::with_evaluator(MaterialEvaluator::new(), depth)
    }
}

impl<E: Evaluator> MinimaxAgent<E> {
    pub fn with_evaluator(evaluator: E, depth: u32) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            search: Search::new(evaluator, depth),
        }
    }

    pub fn search(&self) -> &Search<E> {
        &self.search
    }
}

impl<E: Evaluator> Agent for MinimaxAgent<E> {
    fn choose_move(&mut self, position: &mut Position) -> Option<Move> {
        self.search.best_move(position)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
