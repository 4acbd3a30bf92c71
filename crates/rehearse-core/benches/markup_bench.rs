use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rehearse_core::corpus::CorpusReader;

const SENTENCES: &[&str] = &[
    "<ENAMEX TYPE=\"PERSON\">Shaka Khan</ENAMEX> called.",
    "<ENAMEX TYPE=\"ORG\">Reuters</ENAMEX> reported from <ENAMEX TYPE=\"GPE\">Cairo</ENAMEX> on Monday.",
    "Officials in <ENAMEX TYPE=\"GPE\">Washington</ENAMEX> and <ENAMEX TYPE=\"GPE\">Moscow</ENAMEX> \
     said <ENAMEX TYPE=\"ORG\">NATO</ENAMEX> would respond.",
    "Nothing notable happened on Tuesday.",
    "<ENAMEX TYPE=\"FAC\" S_OFF=\"1\">the Hoover Dam</ENAMEX> reopened after repairs.",
];

fn bench_sentence_conversion(c: &mut Criterion) {
    let reader = CorpusReader::new().unwrap();

    c.bench_function("sentence_single_entity", |b| {
        b.iter(|| reader.sentence(black_box(SENTENCES[0])))
    });

    c.bench_function("sentence_batch", |b| {
        b.iter(|| {
            for s in SENTENCES {
                let _ = reader.sentence(black_box(s));
            }
        })
    });
}

criterion_group!(benches, bench_sentence_conversion);
criterion_main!(benches);
