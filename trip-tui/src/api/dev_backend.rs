use async_trait::async_trait;
use plan_items::domain::{BathroomType, BudgetCategoryType, PlanItem, RoomType, TripPlanItemType};
use plan_items::draft::{
    AccommodationDraft, ActivityDraft, CarDraft, ExpenseDraft, FlightDraft, GroundDraft,
    LocalTransportDraft, PlanItemDraft, PrincipalMode, TransportDraft, TransportLeg,
};
use plan_items::normalize::{normalize_flight_number, parse_date};
use plan_items::payload::{
    CreatePlanItemRequest, FlightAutofillRequest, FlightDetails, PlanItemPayload,
};
use plan_items::{ApiError, PlanItemsApi};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use time::macros::{datetime, time};
use time::{Date, OffsetDateTime};
use tracing::debug;

pub const DEV_TRIP_ID: &str = "dev-trip";

/// Titles starting with this prefix are rejected, to try the error path.
const FAIL_PREFIX: &str = "fail:";
const LATENCY: Duration = Duration::from_millis(600);

/// In-memory stand-in for the trips backend.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
    latency: Duration,
}

#[derive(Debug)]
struct DevStore {
    items: Vec<PlanItem>,
    next_id: u32,
}

impl DevBackend {
    pub fn new() -> Self {
        let items = seed_dev_trip();
        let next_id = items.len() as u32 + 1;
        Self {
            store: Arc::new(Mutex::new(DevStore { items, next_id })),
            latency: LATENCY,
        }
    }

    /// No seed data and no simulated latency.
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            store: Arc::new(Mutex::new(DevStore {
                items: vec![],
                next_id: 1,
            })),
            latency: Duration::ZERO,
        }
    }

    fn store(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_trip(&self, call: &str, trip_id: &str) -> Result<(), ApiError> {
        if trip_id == DEV_TRIP_ID {
            return Ok(());
        }
        Err(rejected(call, 404, "Viaje no encontrado"))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn insert(&self, request: CreatePlanItemRequest) -> String {
        let mut store = self.store();
        let id = format!("dev-item-{}", store.next_id);
        store.next_id += 1;
        store.items.push(PlanItem::from_request(id.clone(), request));
        id
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(call: &str, status: u16, message: &str) -> ApiError {
    ApiError::Backend {
        call: call.to_string(),
        status,
        message: Some(message.to_string()),
    }
}

fn check_title(call: &str, body: &CreatePlanItemRequest) -> Result<(), ApiError> {
    if body.title.starts_with(FAIL_PREFIX) {
        return Err(rejected(call, 422, "El servidor de pruebas rechazó el elemento"));
    }
    Ok(())
}

#[async_trait]
impl PlanItemsApi for DevBackend {
    async fn list_plan_items(&self, trip_id: &str) -> Result<Vec<PlanItem>, ApiError> {
        self.check_trip("GET /trips/:id/plan-items", trip_id)?;
        Ok(self.store().items.clone())
    }

    async fn create_plan_item(
        &self,
        trip_id: &str,
        body: &CreatePlanItemRequest,
    ) -> Result<(), ApiError> {
        const CALL: &str = "POST /trips/:id/plan-items";
        self.simulate_latency().await;
        self.check_trip(CALL, trip_id)?;
        check_title(CALL, body)?;
        let id = self.insert(body.clone());
        debug!(%id, item_type = %body.item_type, "dev backend created plan item");
        Ok(())
    }

    async fn autofill_flight(
        &self,
        trip_id: &str,
        body: &FlightAutofillRequest,
    ) -> Result<(), ApiError> {
        const CALL: &str = "POST /trips/:id/plan-items/flight/autofill";
        self.simulate_latency().await;
        self.check_trip(CALL, trip_id)?;
        let request = resolve_flight(body).ok_or_else(|| rejected(CALL, 404, "Vuelo no encontrado"))?;
        let id = self.insert(request);
        debug!(%id, flight = %body.flight_number, "dev backend autofilled flight");
        Ok(())
    }

    async fn update_plan_item(
        &self,
        trip_id: &str,
        item_id: &str,
        body: &CreatePlanItemRequest,
    ) -> Result<(), ApiError> {
        const CALL: &str = "PATCH /trips/:id/plan-items/:itemId";
        self.simulate_latency().await;
        self.check_trip(CALL, trip_id)?;
        check_title(CALL, body)?;
        let mut store = self.store();
        let item = store
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| rejected(CALL, 404, "Elemento no encontrado"))?;
        *item = PlanItem::from_request(item_id, body.clone());
        Ok(())
    }
}

/// Airline prefix table for the fake flight lookup.
const AIRLINES: [(&str, &str, &str, &str, i64); 4] = [
    ("IB", "Iberia", "MAD", "LIS", 80),
    ("TP", "TAP Air Portugal", "LIS", "OPO", 55),
    ("VY", "Vueling", "BCN", "OPO", 110),
    ("UX", "Air Europa", "MAD", "OPO", 75),
];

fn resolve_flight(body: &FlightAutofillRequest) -> Option<CreatePlanItemRequest> {
    let flight_number = normalize_flight_number(&body.flight_number);
    let date = parse_date(&body.date)?;
    let (_, airline, from, to, minutes) = AIRLINES
        .iter()
        .find(|(prefix, ..)| flight_number.starts_with(prefix))?;
    let departure = date.with_time(time!(08:00)).assume_utc();
    let arrival = departure + time::Duration::minutes(*minutes);
    Some(CreatePlanItemRequest {
        item_type: TripPlanItemType::Flight,
        title: flight_number.clone(),
        day: Some(plan_items::normalize::day_key(date)),
        start_at: Some(departure),
        end_at: Some(arrival),
        location: None,
        notes: None,
        logistics: true,
        cost: body.cost,
        currency: body.currency.clone(),
        budget_category: None,
        flight_details: Some(FlightDetails {
            provider: "dev".to_string(),
            flight_number,
            airline: Some(airline.to_string()),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            duration_minutes: Some(*minutes),
        }),
        destination_transport_details: None,
        accommodation_details: None,
    })
}

fn seed_dev_trip() -> Vec<PlanItem> {
    let drafts = vec![
        PlanItemDraft::Transport(TransportDraft {
            leg: TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Manual {
                flight_number: "ib3104".to_string(),
                airline: "Iberia".to_string(),
                from: "MAD".to_string(),
                to: "LIS".to_string(),
                departure_at: Some(datetime!(2025-07-01 07:35 UTC)),
                arrival_at: Some(datetime!(2025-07-01 08:55 UTC)),
                provider: None,
            }))),
            cost: "129,90".to_string(),
            ..TransportDraft::default()
        }),
        PlanItemDraft::Accommodation(AccommodationDraft {
            name: "Casa do Chiado".to_string(),
            address: "Rua Garrett 12".to_string(),
            city: "Lisboa".to_string(),
            country: "pt".to_string(),
            check_in_at: Some(datetime!(2025-07-01 13:00 UTC)),
            check_out_at: Some(datetime!(2025-07-03 10:00 UTC)),
            guests: "2".to_string(),
            rooms: "1".to_string(),
            room_type: Some(RoomType::Double),
            bathroom_type: Some(BathroomType::Private),
            cost: "240".to_string(),
            ..AccommodationDraft::default()
        }),
        PlanItemDraft::Transport(TransportDraft {
            leg: TransportLeg::Local(LocalTransportDraft {
                title: "Tranvía 28".to_string(),
                location: "Martim Moniz".to_string(),
                start_at: Some(datetime!(2025-07-01 16:00 UTC)),
                end_at: Some(datetime!(2025-07-01 16:45 UTC)),
                notes: String::new(),
            }),
            cost: "3".to_string(),
            ..TransportDraft::default()
        }),
        PlanItemDraft::Activity(ActivityDraft {
            kind: TripPlanItemType::Monument,
            title: "Torre de Belém".to_string(),
            location: "Belém".to_string(),
            start_at: Some(datetime!(2025-07-02 09:30 UTC)),
            end_at: Some(datetime!(2025-07-02 11:00 UTC)),
            cost: "10".to_string(),
            ..ActivityDraft::default()
        }),
        PlanItemDraft::Activity(ActivityDraft {
            kind: TripPlanItemType::Restaurant,
            title: "Time Out Market".to_string(),
            location: "Cais do Sodré".to_string(),
            start_at: Some(datetime!(2025-07-02 13:30 UTC)),
            cost: "35,50".to_string(),
            ..ActivityDraft::default()
        }),
        PlanItemDraft::Transport(TransportDraft {
            leg: TransportLeg::Principal(Some(PrincipalMode::Train(GroundDraft {
                company: "CP".to_string(),
                from: "Lisboa Santa Apolónia".to_string(),
                to: "Porto Campanhã".to_string(),
                departure_at: Some(datetime!(2025-07-03 11:09 UTC)),
                arrival_at: Some(datetime!(2025-07-03 13:58 UTC)),
                booking_ref: "CP-7731".to_string(),
            }))),
            cost: "31,20".to_string(),
            ..TransportDraft::default()
        }),
        PlanItemDraft::Activity(ActivityDraft {
            kind: TripPlanItemType::GuidedTour,
            title: "Bodegas de Gaia".to_string(),
            location: "Vila Nova de Gaia".to_string(),
            start_at: Some(datetime!(2025-07-03 17:00 UTC)),
            end_at: Some(datetime!(2025-07-03 18:30 UTC)),
            cost: "25".to_string(),
            ..ActivityDraft::default()
        }),
        PlanItemDraft::Transport(TransportDraft {
            leg: TransportLeg::Principal(Some(PrincipalMode::Car(CarDraft {
                from: "Porto".to_string(),
                to: "Guimarães".to_string(),
                departure_at: Some(datetime!(2025-07-04 09:00 UTC)),
                arrival_at: Some(datetime!(2025-07-04 10:00 UTC)),
            }))),
            cost: "45".to_string(),
            ..TransportDraft::default()
        }),
        PlanItemDraft::Expense(ExpenseDraft {
            title: "Seguro de viaje".to_string(),
            amount: "18".to_string(),
            category: BudgetCategoryType::Other,
            ..ExpenseDraft::default()
        }),
        PlanItemDraft::Expense(ExpenseDraft {
            title: "Recuerdos".to_string(),
            amount: "22,40".to_string(),
            category: BudgetCategoryType::Shopping,
            occurred_at: Some(datetime!(2025-07-04 18:00 UTC)),
            ..ExpenseDraft::default()
        }),
    ];

    let start: Option<Date> = Some(time::macros::date!(2025 - 07 - 01));
    drafts
        .into_iter()
        .enumerate()
        .filter_map(|(idx, draft)| match draft.build_payload(start) {
            Ok(PlanItemPayload::Create(request)) => {
                Some(PlanItem::from_request(format!("dev-item-{}", idx + 1), request))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_items::domain::ItemCategory;
    use plan_items::payload::Submission;
    use time::macros::date;

    fn expense(title: &str) -> CreatePlanItemRequest {
        match PlanItemDraft::Expense(ExpenseDraft {
            title: title.to_string(),
            amount: "20".to_string(),
            ..ExpenseDraft::default()
        })
        .build_payload(Some(date!(2025 - 07 - 02)))
        {
            Ok(PlanItemPayload::Create(request)) => request,
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn seed_covers_every_category() {
        let categories: Vec<ItemCategory> = seed_dev_trip().iter().map(PlanItem::category).collect();
        assert_eq!(categories.len(), 10);
        for category in [
            ItemCategory::Transport,
            ItemCategory::Accommodation,
            ItemCategory::Activity,
            ItemCategory::Expense,
        ] {
            assert!(categories.contains(&category), "missing {category}");
        }
    }

    #[tokio::test]
    async fn created_items_are_listed() {
        let backend = DevBackend::empty();
        backend
            .submit(DEV_TRIP_ID, &Submission::Create(expense("Cena")))
            .await
            .unwrap();
        let items = backend.list_plan_items(DEV_TRIP_ID).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Cena");
        assert_eq!(items[0].cost, Some(20.0));
        assert_eq!(items[0].day_date(time::UtcOffset::UTC), Some(date!(2025 - 07 - 02)));
    }

    #[tokio::test]
    async fn fail_prefix_is_rejected_with_message() {
        let backend = DevBackend::empty();
        let err = backend
            .create_plan_item(DEV_TRIP_ID, &expense("fail: cena"))
            .await
            .unwrap_err();
        assert_eq!(
            err.backend_message(),
            Some("El servidor de pruebas rechazó el elemento")
        );
        assert!(backend.list_plan_items(DEV_TRIP_ID).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn autofill_resolves_known_airlines() {
        let backend = DevBackend::empty();
        let request = FlightAutofillRequest {
            flight_number: "IB1234".to_string(),
            date: "2025-07-01".to_string(),
            cost: None,
            currency: "EUR".to_string(),
        };
        backend.autofill_flight(DEV_TRIP_ID, &request).await.unwrap();
        let items = backend.list_plan_items(DEV_TRIP_ID).await.unwrap();
        assert_eq!(items[0].item_type, TripPlanItemType::Flight);
        assert_eq!(
            items[0].flight_details.as_ref().and_then(|d| d.airline.as_deref()),
            Some("Iberia")
        );

        let unknown = FlightAutofillRequest {
            flight_number: "ZZ1".to_string(),
            ..request
        };
        let err = backend.autofill_flight(DEV_TRIP_ID, &unknown).await.unwrap_err();
        assert_eq!(err.backend_message(), Some("Vuelo no encontrado"));
    }

    #[tokio::test]
    async fn update_replaces_item() {
        let backend = DevBackend::empty();
        backend.create_plan_item(DEV_TRIP_ID, &expense("Cena")).await.unwrap();
        let id = backend.list_plan_items(DEV_TRIP_ID).await.unwrap()[0].id.clone();

        backend
            .update_plan_item(DEV_TRIP_ID, &id, &expense("Cena en Alfama"))
            .await
            .unwrap();
        let items = backend.list_plan_items(DEV_TRIP_ID).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Cena en Alfama");

        let missing = backend
            .update_plan_item(DEV_TRIP_ID, "nope", &expense("x"))
            .await
            .unwrap_err();
        assert_eq!(missing.backend_message(), Some("Elemento no encontrado"));
    }

    #[tokio::test]
    async fn unknown_trip_is_not_found() {
        let backend = DevBackend::empty();
        let err = backend.list_plan_items("other").await.unwrap_err();
        assert!(matches!(err, ApiError::Backend { status: 404, .. }));
    }
}
