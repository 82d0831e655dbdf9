#[cfg(test)]
mod allocation_scenarios {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use vlsm_drill::generator::InstanceGenerator;
    use vlsm_drill::ip::{Address, CidrNetwork};
    use vlsm_drill::planner::{host_bits, plan, AllocationRecord, AllocationResult, Requirement};

    fn net(text: &str) -> CidrNetwork {
        CidrNetwork::parse(text).unwrap()
    }

    fn assert_well_formed(network: &CidrNetwork, records: &[AllocationRecord]) {
        for (i, record) in records.iter().enumerate() {
            assert!(network.contains_network(&record.subnet), "{} escapes {}", record.subnet, network);
            assert!(record.subnet.total_addresses() >= record.host_count);
            for other in &records[i + 1..] {
                assert!(!record.subnet.overlaps(&other.subnet),
                        "{} overlaps {}", record.subnet, other.subnet);
            }
        }
        assert!(records.windows(2).all(|pair| pair[0].host_count >= pair[1].host_count));
    }

    /// Scenario A: a /24 split into /25, /26 and /27
    #[test]
    fn test_feasible_scenario() {
        let network = net("192.168.0.0/24");
        assert_eq!(network.total_addresses(), 256);
        assert_eq!(network.allocatable_addresses(), 254);

        let requirements = vec![
            Requirement::new("R1", 100),
            Requirement::new("R2", 50),
            Requirement::new("R3", 20),
        ];
        let result = plan(&network, &requirements).unwrap();

        let AllocationResult::Feasible { records } = result else {
            panic!("expected a feasible plan, got {:?}", result);
        };
        let placed: Vec<(&str, String, u64)> = records
            .iter()
            .map(|record| (record.requirement_id.as_str(), record.subnet.to_string(), record.subnet.total_addresses()))
            .collect();
        assert_eq!(
            placed,
            vec![
                ("R1", "192.168.0.0/25".to_string(), 128),
                ("R2", "192.168.0.128/26".to_string(), 64),
                ("R3", "192.168.0.192/27".to_string(), 32),
            ]
        );
        assert_well_formed(&network, &records);
    }

    /// Scenario B: 256 + 128 addresses cannot fit in a /24
    #[test]
    fn test_infeasible_scenario() {
        let requirements = vec![Requirement::new("R1", 200), Requirement::new("R2", 100)];
        let result = plan(&net("192.168.0.0/24"), &requirements).unwrap();
        assert!(matches!(result, AllocationResult::Infeasible { .. }));
        assert!(result.records().is_empty());
    }

    /// Scenario C: a single host takes a /32 and exactly one address
    #[test]
    fn test_single_host_boundary() {
        assert_eq!(host_bits(1), 0);

        let requirements = vec![Requirement::new("big", 2), Requirement::new("one", 1), Requirement::new("next", 1)];
        let result = plan(&net("10.0.0.0/29"), &requirements).unwrap();
        let records = result.records();

        assert_eq!(records[1].subnet.to_string(), "10.0.0.2/32");
        assert_eq!(records[1].subnet.total_addresses(), 1);
        assert_eq!(records[2].subnet.base_address(), Address::parse("10.0.0.3").unwrap());
    }

    /// Scenario D: the same seed reproduces the same instance
    #[test]
    fn test_generator_determinism() {
        let generator = InstanceGenerator::default();
        let first = generator.generate(&mut StdRng::seed_from_u64(42), true).unwrap();
        let second = generator.generate(&mut StdRng::seed_from_u64(42), true).unwrap();
        assert_eq!(first, second);
        assert!(first.expected_feasible);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let network = net("10.10.0.0/22");
        let requirements = vec![
            Requirement::new("a", 60),
            Requirement::new("b", 200),
            Requirement::new("c", 60),
            Requirement::new("d", 7),
        ];
        assert_eq!(plan(&network, &requirements).unwrap(), plan(&network, &requirements).unwrap());
    }

    #[test]
    fn test_generated_plans_are_well_formed() {
        let generator = InstanceGenerator::default();
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..250 {
            let instance = generator.generate(&mut rng, true).unwrap();
            let result = instance.plan().unwrap();
            assert!(result.is_feasible(), "{:?}", instance);
            assert_well_formed(&instance.network, result.records());
        }
    }

    #[test]
    fn test_generated_infeasible_instances_overflow() {
        let generator = InstanceGenerator::default();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..250 {
            let instance = generator.generate(&mut rng, false).unwrap();
            let requested: u64 = instance.requirements.iter().map(|requirement| requirement.host_count).sum();
            assert!(requested > instance.network.allocatable_addresses());
            assert!(!instance.plan().unwrap().is_feasible(), "{:?}", instance);
        }
    }

    #[test]
    fn test_address_round_trip() {
        for text in ["0.0.0.0", "10.0.0.1", "192.168.100.254", "255.255.255.255"] {
            assert_eq!(Address::parse(text).unwrap().to_string(), text);
        }
        for text in ["10.0.0.0/8", "172.16.33.1/20", "0.0.0.0/0"] {
            assert_eq!(net(text).to_string(), text);
        }
    }

    #[test]
    fn test_json_shape() {
        let result = plan(&net("192.168.0.0/24"), &[Requirement::new("R1", 100)]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "feasible");
        assert_eq!(json["records"][0]["subnet"], "192.168.0.0/25");

        let back: AllocationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
