use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typeport_ast::{Declaration, Field, Package, TypeExpr};
use typeport_compiler::{compile_package, render_type, CompileOptions};

fn wide_struct(fields: usize) -> Declaration {
    let fields = (0..fields)
        .map(|i| {
            Field::named(format!("Field{}", i), TypeExpr::pointer(TypeExpr::ident("int64")))
                .with_tag(format!(r#"`json:"field_{},omitempty" yaml:"field{}"`"#, i, i))
                .with_comment(format!("field number {}", i))
        })
        .collect();
    Declaration::new("Wide", TypeExpr::structure(fields)).with_doc("A struct with many fields.")
}

fn render_nested_type(c: &mut Criterion) {
    let ty = TypeExpr::map(
        TypeExpr::ident("string"),
        TypeExpr::array(TypeExpr::pointer(TypeExpr::map(
            TypeExpr::ident("string"),
            TypeExpr::qualified("time", "Time"),
        ))),
    );
    let options = CompileOptions::default().with_mapping("time.Time", "string");

    c.bench_function("render_nested_type", |b| {
        b.iter(|| render_type(black_box(&ty), &options))
    });
}

fn compile_wide_struct(c: &mut Criterion) {
    let package = Package::new("wide", vec![wide_struct(200)]);
    let options = CompileOptions::default();

    c.bench_function("compile_wide_struct", |b| {
        b.iter(|| compile_package(black_box(&package), &options))
    });
}

fn compile_deep_struct(c: &mut Criterion) {
    let mut ty = TypeExpr::ident("string");
    for depth in 0..64 {
        ty = TypeExpr::structure(vec![Field::named(format!("Level{}", depth), ty)]);
    }
    let package = Package::new("deep", vec![Declaration::new("Deep", ty)]);
    let options = CompileOptions::default();

    c.bench_function("compile_deep_struct", |b| {
        b.iter(|| compile_package(black_box(&package), &options))
    });
}

criterion_group!(benches, render_nested_type, compile_wide_struct, compile_deep_struct);
criterion_main!(benches);
