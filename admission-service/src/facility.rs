// Departments, rooms and beds
use crate::error::{AdmissionError, AdmissionResult};
use crate::requests::*;
use crate::service::AdmissionService;
use chrono::Utc;
use database_layer::{
    finish, Bed, BedAvailability, BedFilter, BedStatus, Department, FacilityRows, Room,
};
use error_common::RequestValidation;
use tracing::{info, warn};
use uuid::Uuid;

impl AdmissionService {
    pub async fn create_department(
        &self,
        request: CreateDepartmentRequest,
    ) -> AdmissionResult<Department> {
        request.validate()?;
        let department = Department {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            location: request.location,
            created_at: Utc::now(),
        };
        let mut tx = self.db.begin().await?;
        let result = tx
            .insert_department(&department)
            .await
            .map_err(AdmissionError::from);
        finish(tx, result).await?;
        info!(department_id = %department.id, name = %department.name, "Department created");
        Ok(department)
    }

    pub async fn list_departments(&self) -> AdmissionResult<Vec<Department>> {
        let mut tx = self.db.begin().await?;
        let result = tx.departments().await.map_err(AdmissionError::from);
        finish(tx, result).await
    }

    pub async fn create_room(&self, request: CreateRoomRequest) -> AdmissionResult<Room> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<Room> = async {
            tx.department(request.department_id)
                .await?
                .ok_or(AdmissionError::DepartmentNotFound(request.department_id))?;
            let room = Room {
                id: Uuid::new_v4(),
                department_id: request.department_id,
                room_number: request.room_number.trim().to_string(),
                room_type: request.room_type,
                daily_rate: request.daily_rate.round_dp(2),
                created_at: Utc::now(),
            };
            tx.insert_room(&room).await?;
            Ok(room)
        }
        .await;
        let room = finish(tx, result).await?;
        info!(room_id = %room.id, room_number = %room.room_number, "Room created");
        Ok(room)
    }

    /// New beds start AVAILABLE
    pub async fn create_bed(&self, request: CreateBedRequest) -> AdmissionResult<Bed> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<Bed> = async {
            tx.room(request.room_id)
                .await?
                .ok_or(AdmissionError::RoomNotFound(request.room_id))?;
            let bed = Bed {
                id: Uuid::new_v4(),
                room_id: request.room_id,
                bed_number: request.bed_number.trim().to_string(),
                bed_status: BedStatus::Available,
                current_patient_id: None,
                updated_at: Utc::now(),
            };
            tx.insert_bed(&bed).await?;
            Ok(bed)
        }
        .await;
        let bed = finish(tx, result).await?;
        info!(bed_id = %bed.id, bed_number = %bed.bed_number, "Bed created");
        Ok(bed)
    }

    /// Housekeeping status change; refused while a patient occupies the bed
    pub async fn set_bed_status(
        &self,
        bed_id: Uuid,
        request: UpdateBedStatusRequest,
    ) -> AdmissionResult<Bed> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<Bed> = async {
            let bed = tx
                .bed(bed_id)
                .await?
                .ok_or(AdmissionError::BedNotFound(bed_id))?;
            let now = Utc::now();
            if tx.set_bed_status(bed_id, request.status, now).await? == 0 {
                warn!(bed_id = %bed_id, status = %bed.bed_status, "Bed status change refused");
                return Err(AdmissionError::BedUnavailable(bed_id));
            }
            Ok(Bed {
                bed_status: request.status,
                updated_at: now,
                ..bed
            })
        }
        .await;
        let bed = finish(tx, result).await?;
        info!(bed_id = %bed.id, status = %bed.bed_status, "Bed status updated");
        Ok(bed)
    }

    /// Per-bed board joined with room and department
    pub async fn bed_availability(&self, query: BedQuery) -> AdmissionResult<Vec<BedAvailability>> {
        let filter = BedFilter {
            department_id: query.department_id,
            status: query.status,
        };
        let mut tx = self.db.begin().await?;
        let result = tx
            .bed_availability(&filter)
            .await
            .map_err(AdmissionError::from);
        finish(tx, result).await
    }
}
