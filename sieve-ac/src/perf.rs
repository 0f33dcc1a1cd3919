// Quick release mode performance check
//
// Run with: cargo test --release -p sieve-ac automaton_perf -- --ignored

#[cfg(test)]
mod perf_tests {
    use crate::Automaton;
    use std::time::Instant;

    #[test]
    #[ignore] // Run with: cargo test --release automaton_perf -- --ignored
    fn automaton_perf() {
        let keywords: Vec<_> = (0..1000).map(|i| format!("keyword_{}", i)).collect();
        let automaton = Automaton::new(keywords).unwrap();

        let text = "lorem ipsum keyword_42 dolor sit amet keyword_999 ".repeat(20);
        let symbols = text.chars().count() as u128;

        // Warmup
        for _ in 0..1000 {
            let _ = automaton.find_all(&text);
        }

        let iterations = 10_000;
        let start = Instant::now();
        let mut total = 0;
        for _ in 0..iterations {
            total += automaton.find_all(&text).len();
        }
        let duration = start.elapsed();
        let ns_per_symbol = duration.as_nanos() / (iterations * symbols);

        println!("\n=== Release Mode Automaton Performance ===");
        println!("Iterations: {}", iterations);
        println!("Text length: {} chars", symbols);
        println!("Total time: {:?}", duration);
        println!("Per symbol: {} ns", ns_per_symbol);
        println!("Matches: {}", total);

        // keyword_4 + keyword_42, keyword_9 + keyword_99 + keyword_999, 20 times
        assert_eq!(total, 100 * iterations as usize);
        assert!(ns_per_symbol < 50, "scan should be fast in release mode, got {} ns/char", ns_per_symbol);
    }
}
