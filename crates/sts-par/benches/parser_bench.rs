//! Parser benchmarks, run with `cargo bench --package sts-par`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sts_par::Parser;

fn parse_source(source: &str) {
    let mut parser = Parser::new();
    parser.parse_file(source, "bench.ts", true).unwrap();
    while parser.next_file().is_some() {}
    let _ = parser.finish();
}

fn bench_parser_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_simple");

    let source = "const x: i32 = 42;";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("const_statement", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_functions");

    let source = r#"
        function main(): void {
            const x: i32 = 42;
            let y = x + 1;
            return;
        }

        function fib(n: i32): i32 {
            if (n <= 1) {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("functions", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_classes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_classes");

    let source = r#"
        class Point {
            x: i32;
            y: i32;

            distanceTo(other: Point): i32 {
                const dx = this.x - other.x;
                const dy = this.y - other.y;
                return dx * dx + dy * dy;
            }
        }

        class ColoredPoint extends Point {
            color: string;
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("classes", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_enums(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_enums");

    let source = r#"
        enum Color {
            Red,
            Green,
            Blue,
        }

        const enum Direction {
            Up = 0,
            Down = 1,
            Left = 2,
            Right = 3,
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("enums", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        function process(n: i32): i32 {
            if (n < 0) {
                return -1;
            } else if (n == 0) {
                return 0;
            } else {
                switch (n) {
                    case 1:
                        return 1;
                    case 2:
                        return 2;
                    default: {
                        let sum = 0;
                        let i = 0;
                        while (i < n) {
                            sum = sum + i;
                            i = i + 1;
                        }
                        return sum;
                    }
                }
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("control_flow", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");

    let source = r#"
        import { Drawable } from "./drawable";

        abstract class Shape implements Drawable {
            abstract area(): i32;

            describe(): string {
                return "a shape";
            }
        }

        class Rectangle extends Shape {
            width: i32;
            height: i32;

            area(): i32 {
                return this.width * this.height;
            }
        }

        export function main(): void {
            const shapes: Rectangle[] = [];
            for (let i = 0; i < 10; i = i + 1) {
                shapes.push(new Rectangle(i, i));
            }
            try {
                shapes[0].area();
            } catch (err) {
                throw err;
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("complex_source", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_simple,
    bench_parser_functions,
    bench_parser_classes,
    bench_parser_enums,
    bench_parser_control_flow,
    bench_parser_complex
);
criterion_main!(benches);
