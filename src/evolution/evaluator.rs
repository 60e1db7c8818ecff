use rayon::prelude::*;
use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::evolution::challenge::Challenge;
use crate::genetic::{Gene, Individual, Population};

/// Attaches fitness to every unevaluated individual.
///
/// Evaluation runs on the rayon pool once the number of pending individuals reaches the
/// threshold, and returns only when every individual has been scored. It never draws from
/// the random stream, so a seeded run replays identically either way.
#[derive(Debug, Clone)]
pub struct Evaluator {
    parallel_threshold: usize,
}

impl Evaluator {
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns the evaluated population and the number of challenge calls made.
    ///
    /// # Errors
    ///
    /// Challenge errors are returned as they are. A NaN score is an `InvalidNumericValue`.
    pub fn evaluate<G: Gene>(
        &self,
        population: Population<G>,
        challenge: &dyn Challenge<G>,
    ) -> Result<(Population<G>, usize)> {
        let pending = population.iter().filter(|i| !i.is_evaluated()).count();
        if pending == 0 {
            return Ok((population, 0));
        }

        let evaluated = if pending >= self.parallel_threshold {
            trace!(pending, "evaluating in parallel");
            population
                .into_par_iter()
                .map(|individual| evaluate_one(individual, challenge))
                .collect::<Result<Vec<_>>>()?
        } else {
            trace!(pending, "evaluating sequentially");
            population
                .into_iter()
                .map(|individual| evaluate_one(individual, challenge))
                .collect::<Result<Vec<_>>>()?
        };
        Ok((evaluated, pending))
    }
}

fn evaluate_one<G: Gene>(individual: Individual<G>, challenge: &dyn Challenge<G>) -> Result<Individual<G>> {
    if individual.is_evaluated() {
        return Ok(individual);
    }
    let score = challenge.score(individual.genotype())?;
    if score.is_nan() {
        return Err(GeneticError::InvalidNumericValue(format!(
            "fitness of {:?} is NaN",
            individual.genotype().flatten()
        )));
    }
    Ok(individual.into_evaluated(score))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::genetic::{Chromosome, Genotype, IntGene};

    fn individual(value: i64) -> Individual<IntGene> {
        Individual::new(Genotype::new(vec![Chromosome::new(vec![IntGene::unbounded(value)])]).unwrap())
    }

    fn sum(genotype: &Genotype<IntGene>) -> Result<f64> {
        Ok(genotype.flatten().iter().sum::<i64>() as f64)
    }

    #[test]
    fn test_only_unevaluated_are_scored() {
        let calls = AtomicUsize::new(0);
        let challenge = |g: &Genotype<IntGene>| -> Result<f64> {
            calls.fetch_add(1, Ordering::SeqCst);
            sum(g)
        };
        let population = vec![individual(1), individual(2).into_evaluated(-1.0), individual(3)];

        let (evaluated, count) = Evaluator::new(1000).evaluate(population, &challenge).unwrap();
        assert_eq!(count, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let fitness: Vec<f64> = evaluated.iter().map(|i| i.fitness()).collect();
        assert_eq!(fitness, vec![1.0, -1.0, 3.0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let population: Vec<Individual<IntGene>> = (0..64).map(individual).collect();
        let (sequential, _) = Evaluator::new(1000).evaluate(population.clone(), &sum).unwrap();
        let (parallel, count) = Evaluator::new(1).evaluate(population, &sum).unwrap();
        assert_eq!(count, 64);
        let a: Vec<f64> = sequential.iter().map(|i| i.fitness()).collect();
        let b: Vec<f64> = parallel.iter().map(|i| i.fitness()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nan_is_rejected() {
        let challenge = |_: &Genotype<IntGene>| -> Result<f64> { Ok(f64::NAN) };
        let result = Evaluator::new(1000).evaluate(vec![individual(1)], &challenge);
        assert!(matches!(result, Err(GeneticError::InvalidNumericValue(_))));
    }

    #[test]
    fn test_user_errors_pass_through() {
        let challenge =
            |_: &Genotype<IntGene>| -> Result<f64> { Err(GeneticError::Other("boom".to_string())) };
        let error = Evaluator::new(1).evaluate(vec![individual(1)], &challenge).unwrap_err();
        assert!(matches!(error, GeneticError::Other(ref message) if message == "boom"));
    }
}
