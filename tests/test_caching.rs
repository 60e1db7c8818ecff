use genforge::{
    alteration::RandomMutator,
    caching::{CachedChallenge, ThreadLocalCachedChallenge},
    error::Result,
    evolution::{Challenge, EvolutionEngineBuilder, EvolutionOptions, GenerationCount},
    genetic::{
        BoolChromosomeFactory, BoolGene, Chromosome, DoubleGene, Genotype, GenotypeFactory,
    },
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// Define a challenge that tracks the number of evaluations
#[derive(Clone)]
struct CostlyChallenge {
    // Use Arc<AtomicUsize> to track evaluations across clones
    evaluations: Arc<AtomicUsize>,
}

impl CostlyChallenge {
    fn new() -> Self {
        Self {
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn get_evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Challenge<BoolGene> for CostlyChallenge {
    fn score(&self, genotype: &Genotype<BoolGene>) -> Result<f64> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);

        // Simulate an expensive computation
        std::thread::sleep(std::time::Duration::from_millis(1));

        Ok(genotype.flatten().iter().filter(|&&b| b).count() as f64)
    }
}

fn engine_options(parallel_threshold: usize) -> EvolutionOptions {
    EvolutionOptions::builder()
        .population_size(40)
        .parallel_threshold(parallel_threshold)
        .seed(99)
        .build()
}

#[test]
fn test_cache_skips_repeated_genotypes_during_a_run() {
    let challenge = CostlyChallenge::new();
    let cached = CachedChallenge::new(challenge.clone(), |g: &Genotype<BoolGene>| g.flatten());

    // Three bits give at most eight distinct genotypes.
    let engine = EvolutionEngineBuilder::new()
        .with_genotype_factory(GenotypeFactory::new().with_chromosome(BoolChromosomeFactory::new(3, 0.5)))
        .with_challenge(cached.clone())
        .with_alterer(RandomMutator::new(0.8, 1.0, 0.5).unwrap())
        .with_limit(GenerationCount::new(10).unwrap())
        .with_options(engine_options(1000))
        .build()
        .unwrap();

    engine.evolve().unwrap();

    assert!(challenge.get_evaluations() <= 8);
    assert_eq!(cached.cache_size(), challenge.get_evaluations());
}

#[test]
fn test_thread_local_cache_under_parallel_evaluation() {
    let challenge = CostlyChallenge::new();
    let engine = EvolutionEngineBuilder::new()
        .with_genotype_factory(GenotypeFactory::new().with_chromosome(BoolChromosomeFactory::new(3, 0.5)))
        .with_challenge(ThreadLocalCachedChallenge::new(
            challenge.clone(),
            |g: &Genotype<BoolGene>| g.flatten(),
        ))
        .with_alterer(RandomMutator::new(0.8, 1.0, 0.5).unwrap())
        .with_limit(GenerationCount::new(5).unwrap())
        .with_options(engine_options(1))
        .build()
        .unwrap();

    let result = engine.evolve().unwrap();

    assert!(result.population.iter().all(|i| i.is_evaluated()));
    // Each worker thread scores a genotype at most once.
    let workers = rayon::current_num_threads() + 1;
    assert!(challenge.get_evaluations() <= 8 * workers);
}

#[test]
fn test_derived_keys_for_unhashable_genes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let cached = CachedChallenge::new(
        move |g: &Genotype<DoubleGene>| -> Result<f64> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(g.flatten().iter().sum())
        },
        |g: &Genotype<DoubleGene>| g.flatten().iter().map(|v| v.to_bits()).collect::<Vec<u64>>(),
    );

    let genotype = Genotype::new(vec![Chromosome::new(vec![
        DoubleGene::unbounded(0.5),
        DoubleGene::unbounded(1.5),
    ])])
    .unwrap();

    for _ in 0..5 {
        assert_eq!(cached.score(&genotype).unwrap(), 2.0);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_shared_cache_across_threads() {
    let challenge = CostlyChallenge::new();
    let cached = CachedChallenge::new(challenge.clone(), |g: &Genotype<BoolGene>| g.flatten());
    let genotype = Genotype::new(vec![Chromosome::new(vec![BoolGene::new(true)])]).unwrap();

    // Warm the cache first, so no thread races on the first evaluation.
    cached.score(&genotype).unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..10 {
                    assert_eq!(cached.score(&genotype).unwrap(), 1.0);
                }
            });
        }
    });

    assert_eq!(challenge.get_evaluations(), 1);
}
