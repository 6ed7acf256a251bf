use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dicom_stem::{render, ConfigBuilder, FileProcessor, TagDictionary, Template};

const FULL_TEMPLATE: &str =
    "%_name|patientID_PatientName-%_md5|7_PatientID-%_strmsk|******01_PatientBirthDate-%_nospc|-_ProtocolName";

fn make_tags(i: usize) -> TagDictionary {
    [
        ("PatientID".to_string(), format!("4412364{i}")),
        ("PatientName".to_string(), format!("DOE^JOHN{i}")),
        ("PatientBirthDate".to_string(), "19700415".to_string()),
        ("PatientAge".to_string(), "006Y".to_string()),
        ("ProtocolName".to_string(), format!("MY PROTOCOL NAME {i}")),
        ("StudyDate".to_string(), "20170601".to_string()),
    ]
    .into_iter()
    .collect()
}

fn benchmark_render_templates(c: &mut Criterion) {
    let tags = make_tags(0);

    let mut group = c.benchmark_group("render_templates");

    let templates = [
        ("literal", "output-file.txt"),
        ("plain", "%PatientAge-%PatientID-%StudyDate"),
        ("md5", "%_md5|7_PatientID"),
        ("strmsk", "%_strmsk|******01_PatientBirthDate"),
        ("nospc", "%_nospc|-_ProtocolName"),
        ("name", "%_name|patientID_PatientName"),
        ("full", FULL_TEMPLATE),
    ];

    for (name, template) in templates {
        let parsed = Template::parse(template);
        group.bench_function(name, |b| b.iter(|| parsed.render(black_box(&tags))));
    }

    group.finish();
}

fn benchmark_parse_and_render(c: &mut Criterion) {
    let tags = make_tags(0);

    let mut group = c.benchmark_group("parse_and_render");
    group.throughput(Throughput::Bytes(FULL_TEMPLATE.len() as u64));

    group.bench_function("parse", |b| {
        b.iter(|| Template::parse(black_box(FULL_TEMPLATE)))
    });
    group.bench_function("parse_and_render", |b| {
        b.iter(|| render(black_box(&tags), black_box(FULL_TEMPLATE)))
    });

    group.finish();
}

fn benchmark_render_scalability(c: &mut Criterion) {
    let template = Template::parse(FULL_TEMPLATE);

    let mut group = c.benchmark_group("render_scalability");

    for &size in &[1, 10, 50, 100] {
        let records: Vec<TagDictionary> = (0..size).map(make_tags).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                for tags in records {
                    black_box(template.render(tags));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_processor_creation(c: &mut Criterion) {
    let config = ConfigBuilder::default()
        .output_file_stem(FULL_TEMPLATE)
        .build();

    c.bench_function("processor_creation", |b| {
        b.iter(|| black_box(FileProcessor::new(config.clone())))
    });
}

criterion_group!(
    benches,
    benchmark_render_templates,
    benchmark_parse_and_render,
    benchmark_render_scalability,
    benchmark_processor_creation
);
criterion_main!(benches);
