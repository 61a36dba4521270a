//! Order report.

use std::fmt::Write as _;
use std::path::Path;

use foodexpress_storefront::db::{OrderRepository, open_store};

/// Orders by status and total revenue, one line each.
pub async fn report(data_dir: &Path) -> String {
    let store = open_store(data_dir);
    let stats = OrderRepository::new(&store).stats().await;

    let mut out = String::new();
    let _ = writeln!(out, "Pedidos: {}", stats.count);
    for entry in &stats.by_status {
        let _ = writeln!(out, "  {:<18} {}", entry.status.label(), entry.count);
    }
    let _ = writeln!(out, "Faturamento: {}", stats.revenue);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_on_seed_data() {
        let dir = tempfile::tempdir().unwrap();

        let report = report(dir.path()).await;

        assert!(report.contains("Pedidos: 2"));
        assert!(report.contains("Faturamento: R$ 130.60"));
        assert!(report.contains("Pendente"));
    }
}
