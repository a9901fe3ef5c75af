use chrono::NaiveDate;

use crate::models::{
    employee::{Employee, EmployeeStatus},
    inspection::{Inspection, InspectionStatus},
    movement::{Movement, MovementKind},
    ppe_item::PpeItem,
};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default()
}

fn employee(
    _id: &str,
    name: &str,
    email: &str,
    department: &str,
    position: &str,
    hire_date: &str,
    status: EmployeeStatus,
) -> Employee {
    Employee {
        _id: _id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        department: department.to_string(),
        position: position.to_string(),
        hire_date: date(hire_date),
        status,
    }
}

#[allow(clippy::too_many_arguments)]
fn ppe_item(
    _id: &str,
    kind: &str,
    brand: &str,
    model: &str,
    current_stock: u32,
    minimum_stock: u32,
    unit_price: f64,
    expiration_date: Option<&str>,
    ca: &str,
) -> PpeItem {
    PpeItem {
        _id: _id.to_string(),
        kind: kind.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        current_stock,
        minimum_stock,
        unit_price,
        expiration_date: expiration_date.map(date),
        ca: Some(ca.to_string()),
    }
}

fn movement(
    _id: &str,
    kind: MovementKind,
    on: &str,
    employee_id: Option<&str>,
    ppe_item_id: &str,
    quantity: u32,
    reason: Option<&str>,
) -> Movement {
    Movement {
        _id: _id.to_string(),
        kind,
        date: date(on),
        employee_id: employee_id.map(str::to_string),
        ppe_item_id: ppe_item_id.to_string(),
        quantity,
        reason: reason.map(str::to_string),
        responsible_id: "admin".to_string(),
    }
}

fn inspection(
    _id: &str,
    on: &str,
    ppe_item_id: &str,
    employee_id: &str,
    status: InspectionStatus,
    notes: &str,
    inspector: &str,
) -> Inspection {
    Inspection {
        _id: _id.to_string(),
        date: date(on),
        ppe_item_id: ppe_item_id.to_string(),
        employee_id: employee_id.to_string(),
        status,
        notes: Some(notes.to_string()),
        inspector: inspector.to_string(),
    }
}

pub fn employees() -> Vec<Employee> {
    use EmployeeStatus::*;
    vec![
        employee("emp1", "João Silva", "joao.silva@empresa.com.br", "Produção", "Operador", "2020-01-15", Active),
        employee("emp2", "Maria Souza", "maria.souza@empresa.com.br", "Manutenção", "Técnico", "2019-03-20", Active),
        employee("emp3", "Carlos Santos", "carlos.santos@empresa.com.br", "Produção", "Supervisor", "2018-07-10", Active),
        employee("emp4", "Ana Costa", "ana.costa@empresa.com.br", "Administrativo", "Assistente", "2021-05-01", Inactive),
        employee("emp5", "Pedro Lima", "pedro.lima@empresa.com.br", "Produção", "Operador", "2022-02-28", Active),
        employee("emp6", "Juliana Almeida", "juliana.almeida@empresa.com.br", "Manutenção", "Engenheiro", "2017-11-01", Active),
        employee("emp7", "Fernando Pereira", "fernando.pereira@empresa.com.br", "Produção", "Operador", "2020-08-01", Active),
    ]
}

pub fn ppe_items() -> Vec<PpeItem> {
    vec![
        ppe_item("ppe1", "Luva", "SafetyPro", "Nitrilica", 150, 50, 5.50, Some("2025-12-31"), "12345"),
        ppe_item("ppe2", "Capacete", "HardHat", "Classe B", 30, 10, 45.00, Some("2026-06-30"), "67890"),
        ppe_item("ppe3", "Óculos de Segurança", "EyeGuard", "Anti-risco", 200, 100, 12.00, Some("2025-10-15"), "54321"),
        ppe_item("ppe4", "Máscara", "RespiraSeguro", "PFF2", 40, 20, 8.00, Some("2024-07-01"), "98765"),
        ppe_item("ppe5", "Protetor Auricular", "QuietZone", "Plug Silicone", 80, 30, 7.50, Some("2026-01-20"), "11223"),
        ppe_item("ppe6", "Bota de Segurança", "FootSafe", "Couro Bico PVC", 15, 10, 80.00, Some("2027-03-01"), "44556"),
        ppe_item("ppe7", "Uniforme", "WorkWear", "Algodão", 70, 25, 60.00, None, "77889"),
    ]
}

pub fn movements() -> Vec<Movement> {
    use MovementKind::*;
    vec![
        movement("mov1", Delivery, "2024-06-10", Some("emp1"), "ppe1", 2, None),
        movement("mov2", Return, "2024-06-15", Some("emp1"), "ppe1", 1, Some("Desgaste")),
        movement("mov3", Delivery, "2024-06-20", Some("emp2"), "ppe2", 1, None),
        movement("mov4", Replacement, "2024-06-25", Some("emp3"), "ppe3", 1, Some("Dano")),
        movement("mov5", Discard, "2024-05-01", None, "ppe4", 5, Some("Vencimento")),
        movement("mov6", Delivery, "2024-05-10", Some("emp5"), "ppe1", 3, None),
        movement("mov7", Delivery, "2024-04-05", Some("emp6"), "ppe5", 1, None),
        movement("mov8", Delivery, "2024-04-12", Some("emp7"), "ppe2", 1, None),
        movement("mov9", Return, "2024-03-01", Some("emp5"), "ppe1", 1, Some("Fim de uso")),
        movement("mov10", Delivery, "2024-03-15", Some("emp1"), "ppe3", 1, None),
    ]
}

pub fn inspections() -> Vec<Inspection> {
    use InspectionStatus::*;
    vec![
        inspection("insp1", "2024-06-01", "ppe1", "emp1", Approved, "Em bom estado", "Inspetor A"),
        inspection("insp2", "2024-05-15", "ppe2", "emp2", Warning, "Pequeno arranhão", "Inspetor B"),
        inspection("insp3", "2024-04-20", "ppe3", "emp3", Rejected, "Trincado", "Inspetor A"),
        inspection("insp4", "2024-06-20", "ppe5", "emp6", Approved, "Conforme", "Inspetor C"),
        inspection("insp5", "2024-06-25", "ppe1", "emp5", Approved, "Limpo", "Inspetor B"),
    ]
}
