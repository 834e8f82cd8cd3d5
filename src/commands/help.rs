/// Command reference shown by `$help`
pub fn text() -> String {
    [
        "📖 Luna Ticker Commands",
        "",
        "🎯 General",
        "  $help            Show this help message",
        "  $quit            Stop the ticker",
        "",
        "📊 Prices & Charts",
        "  $price           Fetch the price now",
        "  $chart           Redraw the chart and show where it was written",
        "  $history         List the recorded prices",
        "",
        "💱 Trading",
        "  $buy [amount]    Buy (default 100 units)",
        "  $sell [amount]   Sell (default 100 units)",
        "",
        "Read-only markets only simulate buys and sells.",
    ]
    .join("\n")
}
