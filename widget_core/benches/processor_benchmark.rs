use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use std::hint::black_box;
use widget_core::api::{
    Aggregation, DataSource, SortDirection, SortSpec, WidgetConfig, WidgetType,
};
use widget_core::models::SystemData;
use widget_core::services::WidgetDataProcessor;

const STATUSES: [&str; 4] = ["released", "in-progress", "closed", "on-hold"];

fn orders(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "id": i,
                "status": STATUSES[i % STATUSES.len()],
                "plant": format!("P{}", i % 7),
                "quantity": (i * 13) % 500,
                "created_at": format!("2024-05-{:02}T08:00:00Z", 1 + i % 28),
            })
        })
        .collect()
}

fn snapshot(n: usize) -> SystemData {
    let mut data = SystemData::new();
    data.set_collection(&DataSource::ProductionOrders, orders(n));
    data
}

fn bench_widget_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_widget_data");

    let mut kpi = WidgetConfig::new("kpi", WidgetType::Kpi, DataSource::ProductionOrders, "KPI");
    kpi.aggregation = Some(Aggregation::Sum);
    kpi.aggregation_field = Some("quantity".to_string());
    kpi.filters = serde_json::from_value(json!({ "status": ["released", "in-progress"] })).ok();

    let mut chart = WidgetConfig::new(
        "chart",
        WidgetType::Chart,
        DataSource::ProductionOrders,
        "Chart",
    );
    chart.group_by = Some("plant".to_string());
    chart.aggregation = Some(Aggregation::Avg);
    chart.aggregation_field = Some("quantity".to_string());

    let mut table = WidgetConfig::new(
        "table",
        WidgetType::Table,
        DataSource::ProductionOrders,
        "Table",
    );
    table.sort_by = Some(SortSpec::new("created_at", SortDirection::Desc));
    table.limit = Some(25);

    for size in [100usize, 1_000, 10_000] {
        let data = snapshot(size);
        let processor = WidgetDataProcessor::new(&data);

        for config in [&kpi, &chart, &table] {
            group.bench_with_input(
                BenchmarkId::new(config.id.as_str(), size),
                config,
                |b, config| b.iter(|| processor.process_widget_data(black_box(config))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_widget_types);
criterion_main!(benches);
