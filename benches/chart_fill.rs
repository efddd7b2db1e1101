use criterion::{black_box, criterion_group, criterion_main, Criterion};

use treegrain::chart::Token;
use treegrain::Grammar;

const GRAMMAR_SRC: &str = "S NP VP\t1.0
NP DT NN\t0.5
NP NP PP\t0.3
NP NNP\t0.2
VP VBD NP\t0.6
VP VP PP\t0.4
PP IN NP\t1.0
";

fn tokens(s: &str) -> Vec<Token> {
  s.split(',').map(|l| l.parse().unwrap()).collect()
}

fn criterion_benchmark(c: &mut Criterion) {
  let grammar = GRAMMAR_SRC.parse::<Grammar>().unwrap();
  let short_input = tokens("the DT,dog NN,saw VBD,rex NNP");
  let long_input = tokens(
    "the DT,dog NN,saw VBD,the DT,cat NN,in IN,the DT,garden NN,of IN,rex NNP",
  );

  c.bench_function("fill chart short", |b| {
    b.iter(|| black_box(&grammar).parse_chart(black_box(&short_input)))
  });

  c.bench_function("fill chart ambiguous pp attachment", |b| {
    b.iter(|| black_box(&grammar).parse_chart(black_box(&long_input)))
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
