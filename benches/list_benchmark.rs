use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ringlist::{List, StackAllocator, StackStorage};
use std::collections::LinkedList;

const LEN: u64 = 1000;
// 1000 u64 nodes with room for padding.
const ARENA: usize = 32 * 1024;

fn bench_list_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_push_pop");

    group.bench_function("std_linked_list", |b| {
        b.iter(|| {
            let mut list = LinkedList::new();
            for i in 0..LEN {
                list.push_back(i);
            }
            while let Some(x) = list.pop_front() {
                black_box(x);
            }
        });
    });

    group.bench_function("list_global", |b| {
        b.iter(|| {
            let mut list = List::new();
            for i in 0..LEN {
                list.push_back(i);
            }
            while let Some(x) = list.pop_front() {
                black_box(x);
            }
        });
    });

    group.bench_function("list_stack_storage", |b| {
        b.iter(|| {
            let storage = StackStorage::<ARENA>::new();
            let mut list = List::new_in(StackAllocator::new(&storage));
            for i in 0..LEN {
                list.push_back(i);
            }
            while let Some(x) = list.pop_front() {
                black_box(x);
            }
        });
    });

    group.finish();
}

fn bench_list_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_iter");

    group.bench_function("std_linked_list", |b| {
        let list: LinkedList<u64> = (0..LEN).collect();
        b.iter(|| black_box(list.iter().sum::<u64>()));
    });

    group.bench_function("list_global", |b| {
        let list: List<u64> = (0..LEN).collect();
        b.iter(|| black_box(list.iter().sum::<u64>()));
    });

    group.bench_function("list_stack_storage", |b| {
        let storage = StackStorage::<ARENA>::new();
        let mut list: List<u64, _> = List::new_in(StackAllocator::new(&storage));
        list.extend(0..LEN);
        b.iter(|| black_box(list.iter().sum::<u64>()));
    });

    group.finish();
}

fn bench_list_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_clone");

    group.bench_function("std_linked_list", |b| {
        let list: LinkedList<u64> = (0..LEN).collect();
        b.iter(|| black_box(list.clone()));
    });

    group.bench_function("list_global", |b| {
        let list: List<u64> = (0..LEN).collect();
        b.iter(|| black_box(list.clone()));
    });

    group.finish();
}

criterion_group!(benches, bench_list_push_pop, bench_list_iter, bench_list_clone);
criterion_main!(benches);
