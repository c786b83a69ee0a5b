pub mod dashboard_dto;

pub use dashboard_dto::{
    DashboardDto, DashboardQuery, LocationCountDto, RecentIncidentDto, StatusCountDto,
    StatusSliceDto, StatusSummaryDto, TimeRange, TrendPointDto, TypeShareDto,
};
