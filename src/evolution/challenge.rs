use crate::error::Result;
use crate::genetic::{Gene, Genotype};

/// The fitness function of a run.
///
/// A challenge scores a genotype. It is called once per individual, possibly from several
/// threads at once, and must never return NaN: NaN marks an individual as unevaluated.
/// Errors are handed back to the caller of the run untouched.
///
/// Any `Fn(&Genotype<G>) -> Result<f64> + Send + Sync` closure is a challenge.
pub trait Challenge<G: Gene>: Send + Sync {
    fn score(&self, genotype: &Genotype<G>) -> Result<f64>;
}

impl<G, F> Challenge<G> for F
where
    G: Gene,
    F: Fn(&Genotype<G>) -> Result<f64> + Send + Sync,
{
    fn score(&self, genotype: &Genotype<G>) -> Result<f64> {
        self(genotype)
    }
}
