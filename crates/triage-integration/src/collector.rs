//! 全量患者收集
//!
//! 从第 1 页开始顺序请求，按页序拼接患者，直到某页 `hasNext` 为 false。
//! 同一时间只有一个请求在进行。

use std::time::Duration;
use tracing::{debug, warn};
use triage_admin::TriageConfig;
use triage_core::{PatientRecord, Result, TriageError};

use crate::fetcher::PageFetcher;

/// 收集结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientCollection {
    /// 按页序、页内顺序排列的全部患者
    pub patients: Vec<PatientRecord>,
    pub pages_fetched: u32,
    /// 最后一页报告的总记录数
    pub reported_total: Option<u64>,
}

/// 患者收集器
pub struct PatientCollector {
    fetcher: PageFetcher,
    paging_delay: Duration,
}

impl PatientCollector {
    pub fn new(fetcher: PageFetcher, config: &TriageConfig) -> Self {
        Self {
            fetcher,
            paging_delay: config.paging_delay(),
        }
    }

    /// 收集全部页
    ///
    /// 任一页失败时返回 `TriageError::Collection`，其中带有已收集的部分患者。
    pub async fn collect(&self) -> Result<PatientCollection> {
        let mut collection = PatientCollection::default();
        let mut page = 1;

        loop {
            let response = match self.fetcher.fetch_page(page).await {
                Ok(response) => response,
                Err(source) => {
                    return Err(TriageError::Collection {
                        partial: collection.patients,
                        source: Box::new(source),
                    });
                }
            };

            let pagination = &response.pagination;
            if pagination.page != page {
                warn!("Requested page {} but server returned page {}", page, pagination.page);
            }
            if !pagination.is_consistent() {
                warn!(
                    "Inconsistent pagination on page {}: hasNext={} totalPages={}",
                    page, pagination.has_next, pagination.total_pages
                );
            }

            let has_next = pagination.has_next;
            collection.reported_total = Some(pagination.total);
            collection.pages_fetched += 1;
            debug!(
                "Page {} returned {} patients (request {})",
                page,
                response.data.len(),
                response.metadata.request_id
            );
            collection.patients.extend(response.data);

            if !has_next {
                break;
            }

            page += 1;
            tokio::time::sleep(self.paging_delay).await;
        }

        if let Some(total) = collection.reported_total {
            if total != collection.patients.len() as u64 {
                warn!(
                    "Collected {} patients but server reported total {}",
                    collection.patients.len(),
                    total
                );
            }
        }

        Ok(collection)
    }
}
