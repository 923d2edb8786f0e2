//! Quotas and quota increase requests
//!
//! `/v2/client_quotas`, `/v2/global_quotas`, `/v2/regional_quotas` report
//! limits and usage; `/v2/limits_request` manages increase requests.

mod requests;
mod types;

pub use requests::{
    create_limit_request, delete_limit_request, get_combined, get_global, get_limit_request,
    get_regional, list_limit_requests,
};
pub use types::{
    CombinedQuota, CreateLimitRequestOpts, LimitRequest, LimitRequestStatus, Quota,
    RegionalQuota, RequestedLimits,
};
