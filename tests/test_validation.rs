use genforge::{
    alteration::{CombineCrossover, InversionMutator, RandomMutator},
    constraints::{enforce, ConstraintKind, DoubleRequirement, IntRequirement, ValidationMode},
    context::EvolutionContext,
    error::{GeneticError, Result},
    evolution::{EvolutionOptions, GenerationCount, TargetFitness},
    genetic::{
        ChromosomeFactory, Genotype, IntChromosomeFactory, IntGene, PermutationChromosomeFactory,
        Primitive, PrimitiveSet,
    },
    selection::TournamentSelector,
};

#[test]
fn test_violations_of_one_block_are_reported_together() {
    let error = RandomMutator::new(-0.1, 2.0, 0.5).unwrap_err();
    let violations = error.violations().unwrap();

    assert_eq!(violations.len(), 2);
    assert!(violations.iter().all(|v| v.kind() == ConstraintKind::Double));
    assert!(violations.contains_clause("probability"));
    assert!(violations.contains_clause("chromosomeRate"));
    assert!(!violations.contains_clause("geneRate"));
}

#[test]
fn test_error_messages_name_the_clause() {
    let error = InversionMutator::new(0.5, 0.5, 1.5).unwrap_err();
    let message = error.to_string();
    assert!(message.starts_with("Constraint error"));
    assert!(message.contains("boundaryProbability"), "{}", message);
}

#[test]
fn test_integer_requirements_classify_as_int() {
    let error = TournamentSelector::new(0).unwrap_err();
    let violation = error.violations().unwrap().iter().next().unwrap().clone();
    assert_eq!(violation.kind(), ConstraintKind::Int);
    assert_eq!(violation.clause(), "tournamentSize");

    assert!(GenerationCount::new(0).is_err());
    assert!(TargetFitness::new(f64::INFINITY).is_err());
}

#[test]
fn test_combine_crossover_rejects_a_single_parent() {
    let error = CombineCrossover::with_parents(
        |genes: &[IntGene]| -> Result<IntGene> { Ok(genes[0].clone()) },
        0.5,
        0.5,
        1,
    )
    .unwrap_err();
    assert!(error.violations().unwrap().contains_clause("numParents"));
}

#[test]
fn test_factory_configuration_errors() {
    let mut ctx = EvolutionContext::seeded(0);

    let factory = IntChromosomeFactory::new(0).with_ranges(vec![5..=1, 0..=3, 0..=9]);
    let violations = factory.make(&mut ctx).unwrap_err();
    let violations = violations.violations().unwrap();
    assert!(violations.contains_clause("size"));
    assert!(violations.contains_clause("ranges"));
    assert!(violations.contains_clause("ranges[0]"));

    let duplicates = PermutationChromosomeFactory::new(vec![1_i64, 2, 2]);
    assert!(duplicates.make(&mut ctx).is_err());
}

#[test]
fn test_skip_mode_bypasses_runtime_checks() {
    let mut ctx = EvolutionContext::seeded(0).with_validation(ValidationMode::Skip);
    let duplicates = PermutationChromosomeFactory::new(vec![1_i64, 2, 2]);
    let chromosome = duplicates.make(&mut ctx).unwrap();
    assert_eq!(chromosome.len(), 3);

    let options = EvolutionOptions::builder().population_size(10).build();
    assert_eq!(options.context().validation, ValidationMode::Enforce);
}

#[test]
fn test_genotypes_need_chromosomes() {
    let error = Genotype::<IntGene>::new(Vec::new()).unwrap_err();
    assert!(matches!(error, GeneticError::Constraint(_)));
}

#[test]
fn test_primitive_sets_check_arities() {
    let error = PrimitiveSet::new(
        vec![Primitive::new("neg", 0)],
        vec![Primitive::new("x", 1)],
    )
    .unwrap_err();
    assert_eq!(error.violations().unwrap().len(), 2);
}

#[test]
fn test_custom_blocks() {
    let population_size = 0_usize;
    let mutation_rate = f64::NAN;
    let error = enforce(|e| {
        e.require("populationSize", &population_size, IntRequirement::BePositive);
        e.require("mutationRate", &mutation_rate, DoubleRequirement::BeInUnitInterval);
        e.require_not("populationSize", &population_size, IntRequirement::BeAtLeast(1));
    })
    .unwrap_err();

    // NaN satisfies no double requirement.
    assert_eq!(error.violations().unwrap().len(), 2);
}
