//! Exponential Moving Average of closing prices.
//!
//! α = 2/(span+1), adjusted form: each output is the weighted mean of every
//! close seen so far with weights (1-α)^k, k counting back from the current
//! bar. Defined from bar 0 (EMA[0] = C[0]); converges to the recursive
//! EMA[i] = C[i]*α + EMA[i-1]*(1-α) once the early weights have decayed.

pub fn calculate_ema(closes: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return vec![f64::NAN; closes.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    closes
        .iter()
        .map(|&close| {
            weighted_sum = close + decay * weighted_sum;
            weight_total = 1.0 + decay * weight_total;
            weighted_sum / weight_total
        })
        .collect()
}
