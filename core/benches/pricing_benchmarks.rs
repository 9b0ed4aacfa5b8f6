use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chrono::NaiveDate;
use ornament_pricing::{
  BundleEntry, CheckoutRequest, OrderAssembler, OrderInput, OrderableItem, Pipeline, PipelineControl, PricingError,
  PricingResult, RentalWindow, SkipCondition,
};
use rust_decimal::Decimal;

#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
}

fn bundle_of(size: usize) -> OrderInput {
  OrderInput::Bundle(
    (0..size)
      .map(|i| BundleEntry {
        item: OrderableItem::new(format!("orn-{}", i), format!("Ornament {}", i), Decimal::from(100 + i as i64)),
        quantity: Some((i % 3) as u32 + 1),
      })
      .collect(),
  )
}

// --- Benchmark Functions ---

fn bench_assemble_purchase(c: &mut Criterion) {
  let mut group = c.benchmark_group("AssemblePurchase");
  let assembler = OrderAssembler::default();

  for size in [1usize, 10, 100, 1000].iter() {
    let request = CheckoutRequest::new("bench-buyer", bundle_of(*size))
      .with_shipping("INSIDE_THE_VALLEY")
      .with_payment("esewa");
    group.throughput(Throughput::Elements(*size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, req| {
      b.iter(|| assembler.assemble(black_box(req)).ok())
    });
  }
  group.finish();
}

fn bench_assemble_rental(c: &mut Criterion) {
  let assembler = OrderAssembler::default();
  let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
  let end = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
  let request = CheckoutRequest::new("bench-buyer", bundle_of(1))
    .with_shipping("OUTSIDE_THE_VALLEY")
    .with_payment("cod")
    .with_rental(RentalWindow::new(start, end).unwrap());

  c.bench_function("AssembleRental", |b| b.iter(|| assembler.assemble(black_box(&request)).ok()));
}

fn bench_normalize_from_json(c: &mut Criterion) {
  let mut group = c.benchmark_group("NormalizeFromJson");
  for size in [10usize, 100].iter() {
    let raw = serde_json::Value::Array(
      (0..*size)
        .map(|i| serde_json::json!({ "ornament": { "_id": format!("orn-{}", i), "price": "250" }, "quantity": 2 }))
        .collect(),
    );
    group.throughput(Throughput::Elements(*size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
      b.iter(|| OrderInput::from_json(black_box(raw)).and_then(|input| input.normalize()).ok())
    });
  }
  group.finish();
}

fn bench_pipeline_dispatch_overhead(c: &mut Criterion) {
  let mut group = c.benchmark_group("PipelineDispatch");
  for num_steps in [1usize, 5, 20].iter() {
    let names: Vec<String> = (0..*num_steps).map(|i| format!("step_{}", i)).collect();
    let defs: Vec<(&str, bool, Option<SkipCondition<BenchContext>>)> = names.iter().map(|n| (n.as_str(), false, None)).collect();
    let mut pipeline = Pipeline::<BenchContext, PricingError>::new(&defs);
    for name in &names {
      pipeline.on_step(name, |ctx: &mut BenchContext| -> PricingResult<PipelineControl> {
        ctx.counter = ctx.counter.wrapping_add(1);
        Ok(PipelineControl::Continue)
      });
    }
    group.throughput(Throughput::Elements(*num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &pipeline, |b, p| {
      b.iter(|| {
        let mut ctx = BenchContext::default();
        p.run(&mut ctx).ok()
      })
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_assemble_purchase,
  bench_assemble_rental,
  bench_normalize_from_json,
  bench_pipeline_dispatch_overhead
);
criterion_main!(benches);
