use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::lineups::LineupProvider;
use crate::store::models::{LineupRecord, MatchRecord, MatchStatus, Snapshot};
use crate::store::SnapshotStore;

/// Build one snapshot from the catalog: partition matches by status, then
/// attach concurrently fetched lineups to the ongoing and finished lists.
///
/// The fetches form one fan-out batch over the provider's shared HTTP
/// session. A miss or failure degrades that one match to "no lineup this
/// cycle" and never disturbs its siblings, so the snapshot is always
/// complete with respect to the catalog.
pub async fn build_snapshot(catalog: &Catalog, provider: &dyn LineupProvider) -> Snapshot {
    let mut snapshot = Snapshot::default();
    let mut pending: Vec<u64> = Vec::new();

    for entry in &catalog.matches {
        let Some(status) = MatchStatus::from_catalog(&entry.status) else {
            debug!(
                "Skipping match {} with unrecognized status '{}'",
                entry.id, entry.status
            );
            continue;
        };
        let record = MatchRecord {
            id: entry.id,
            home_team: entry.home_team.clone(),
            away_team: entry.away_team.clone(),
            start_time: entry.start_time,
            status,
            lineup: None,
        };
        match status {
            MatchStatus::InProgress => {
                pending.push(entry.id);
                snapshot.ongoing.push(record);
            }
            MatchStatus::Finished => {
                pending.push(entry.id);
                snapshot.finished.push(record);
            }
            MatchStatus::NotStarted => snapshot.not_started.push(record),
        }
    }

    // Fan out all lineup fetches at once and collect whatever came back.
    let fetches: Vec<_> = pending
        .iter()
        .map(|&match_id| async move {
            match provider.fetch_lineup(match_id).await {
                Ok(lineup) => lineup,
                Err(e) => {
                    error!("Lineup fetch for match {} failed: {:#}", match_id, e);
                    None
                }
            }
        })
        .collect();
    let results = futures_util::future::join_all(fetches).await;

    // Key fetched lineups by match id; on duplicate ids the first fetched
    // lineup wins, and every record with that id gets the same lineup.
    let mut lineups: HashMap<u64, LineupRecord> = HashMap::new();
    for lineup in results.into_iter().flatten() {
        lineups.entry(lineup.match_id).or_insert(lineup);
    }

    for record in snapshot
        .ongoing
        .iter_mut()
        .chain(snapshot.finished.iter_mut())
    {
        if let Some(lineup) = lineups.get(&record.id) {
            record.lineup = Some(lineup.clone());
        }
    }

    snapshot
}

/// One full refresh cycle: build a fresh snapshot, then publish it.
/// Publication happens only after the whole fetch batch has settled, so
/// a partial cycle is never visible to readers.
pub async fn run_cycle(
    catalog: &Catalog,
    provider: &dyn LineupProvider,
    store: &SnapshotStore,
) -> Result<()> {
    let snapshot = build_snapshot(catalog, provider).await;
    store.publish(&snapshot)?;
    info!(
        "Snapshot published: {} ongoing, {} finished, {} not started",
        snapshot.ongoing.len(),
        snapshot.finished.len(),
        snapshot.not_started.len()
    );
    Ok(())
}

/// Drive refresh cycles forever with a fixed sleep between them. Cycles
/// are strictly serialized: a slow cycle delays the next, it never
/// overlaps it. A failed cycle is logged and the previously published
/// snapshot stays in place until the next attempt.
pub async fn run_refresh_loop(
    catalog: Catalog,
    provider: Arc<dyn LineupProvider>,
    store: SnapshotStore,
    interval: Duration,
) {
    info!(
        "Refresh loop started: {} catalog matches via {}, every {:?}",
        catalog.matches.len(),
        provider.name(),
        interval
    );
    loop {
        if let Err(e) = run_cycle(&catalog, provider.as_ref(), &store).await {
            error!("Refresh cycle failed: {:#}", e);
        }
        tokio::time::sleep(interval).await;
    }
}
