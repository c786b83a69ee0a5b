pub mod incident_dto;

pub use incident_dto::{
    CreateIncidentDto, IncidentCatalogDto, IncidentListItemDto, IncidentResponseDto,
    ListIncidentsQuery, SubmitIncidentFormDto, SubmitIncidentResponseDto,
};
