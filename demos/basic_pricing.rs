//! Example: Basic options pricing with Black-Scholes
//!
//! Run with: cargo run --example basic_pricing

use bsm_greeks::prelude::*;

fn print_row(label: &str, result: &OptionResult) {
    print!("{:<8}", label);
    for (_, value) in result.to_row() {
        print!("{:>12.4}", value);
    }
    println!();
}

fn main() {
    // Option parameters
    let spot = 500.0;
    let strike = 505.0;
    let days = 90;
    let vol = 0.20; // 20% volatility

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Days:     {}", days);
    println!("Rate:     {:.1}%", DEFAULT_RISK_FREE_RATE * 100.0);
    println!("Vol:      {:.1}%", vol * 100.0);
    println!(
        "Intrinsic: call ${:.2}, put ${:.2}\n",
        OptionType::Call.intrinsic(spot, strike),
        OptionType::Put.intrinsic(spot, strike)
    );

    let engine = PricingEngine::default();
    let call = OptionSpec::with_volatility(OptionType::Call, spot, strike, days, vol);
    let put = OptionSpec::with_volatility(OptionType::Put, spot, strike, days, vol);

    let (call_result, put_result) = match (engine.evaluate(&call), engine.evaluate(&put)) {
        (Ok(c), Ok(p)) => (c, p),
        (Err(e), _) | (_, Err(e)) => {
            println!("Could not price: {}", e);
            return;
        }
    };

    print!("{:<8}", "");
    for column in OptionResult::COLUMNS {
        print!("{:>12}", column);
    }
    println!();
    print_row("Call", &call_result);
    print_row("Put", &put_result);

    // Verify put-call parity: C - P = S - K*e^(-rT)
    let time = call.time_to_expiration();
    let parity_lhs = call_result.price - put_result.price;
    let parity_rhs = spot - strike * (-DEFAULT_RISK_FREE_RATE * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.6}", (parity_lhs - parity_rhs).abs());

    // Implied volatility calculation
    println!("\n=== Implied Volatility ===\n");
    let market_price = call_result.price + 0.50; // Simulated market price
    let quoted = OptionSpec::with_market_price(OptionType::Call, spot, strike, days, market_price);
    match engine.evaluate(&quoted) {
        Ok(result) => println!(
            "Market price ${:.4} implies vol: {:.2}%",
            market_price,
            result.implied_volatility * 100.0
        ),
        Err(e) => println!("Could not solve for IV: {}", e),
    }

    let legacy = PricingEngine::new(PricingConfig::legacy()).unwrap_or_default();
    if let Ok(result) = legacy.evaluate(&quoted) {
        println!(
            "Legacy grid scan implies vol: {:.2}%",
            result.implied_volatility * 100.0
        );
    }
}
