use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mathdrill_core::model::{Answer, Operator, OperatorSet, Pins};
use mathdrill_core::{Equation, QuizSession};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let allowed = OperatorSet::default();

    for op in Operator::ALL {
        group.bench_function(op.name(), |b| {
            let mut rng = StdRng::seed_from_u64(1);
            let pins = Pins::operator(op);
            b.iter(|| Equation::generate(&mut rng, black_box(&allowed), black_box(&pins)))
        });
    }

    group.bench_function("pinned_dividend", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        let pins = Pins {
            operator: Some(Operator::Divide),
            first: Some(72),
            second: None,
        };
        b.iter(|| Equation::generate(&mut rng, black_box(&allowed), black_box(&pins)))
    });

    group.finish();
}

fn bench_session_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_cycle");

    group.bench_function("random_answer_score", |b| {
        let mut session = QuizSession::seeded(OperatorSet::default(), 7);
        b.iter(|| {
            let answer = session
                .next_random_question(&Pins::default())
                .ok()
                .and_then(Equation::correct_answer)
                .unwrap_or_default();
            session.submit_answer(Answer::Value(answer)).ok();
            black_box(session.score())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_session_cycle);
criterion_main!(benches);
