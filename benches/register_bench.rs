use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vat_register::VatRegister;

fn populated(companies: usize, invoices_each: u32) -> VatRegister {
    let mut register = VatRegister::new();
    for i in 0..companies {
        let _ = register.new_company(&format!("Company {}", i), "Main Street", &i.to_string());
        for amount in 0..invoices_each {
            let _ = register.invoice_by_tax_id(&i.to_string(), amount * 7 + i as u32);
        }
    }
    register
}

fn benchmark_insert_and_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_and_cancel");

    for companies in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(companies),
            companies,
            |b, &companies| {
                b.iter(|| {
                    let mut register = populated(companies, 0);
                    for i in (0..companies).step_by(2) {
                        let _ = register.cancel_by_name(&format!("company {}", i), "MAIN STREET");
                    }
                    black_box(register.len())
                });
            },
        );
    }

    group.finish();
}

fn benchmark_median(c: &mut Criterion) {
    let register = populated(100, 1000);

    c.bench_function("median_100k_invoices", |b| {
        b.iter(|| black_box(register.median_invoice()));
    });
}

fn benchmark_traversal(c: &mut Criterion) {
    let register = populated(10000, 0);

    c.bench_function("walk_10k_companies", |b| {
        b.iter(|| {
            let mut count = 0;
            let mut cursor = register.first_company();
            while let Some((name, addr)) = cursor {
                cursor = register.next_company(&name, &addr);
                count += 1;
            }
            black_box(count)
        });
    });
}

criterion_group!(benches, benchmark_insert_and_cancel, benchmark_median, benchmark_traversal);
criterion_main!(benches);
