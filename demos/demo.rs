use tinhthanh::{AddressComparator, UNRESOLVED};

fn main() {
    let comparator = AddressComparator::embedded().expect("bundled ground truth");

    println!("=== 省份提取演示 ===\n");

    let test_cases = vec![
        // 官方名称
        "123 Lê Lợi, P. Bến Thành, Q.1, Hồ Chí Minh",
        "45 Hàng Bông, Hoàn Kiếm, Hà Nội",
        // 缩写
        "123 Lê Lợi, TPHCM",
        "15 Trần Quý Cáp, P. Ninh Hiệp, KH",
        // 无声调
        "45 Hang Bong, Hanoi",
        "Ninh Kieu, Can Tho",
        // 旧式声调位置
        "Nha Trang, Khánh Hoà",
        // 合并前的省份
        "170 Hùng Vương, Bến Tre",
        "Phường 1, TP. Vũng Tàu",
        // 更具体的名称优先
        "12 Thừa Thiên Huế, Q. Ba Đình, Hà Nội",
        "Tra Vinh",
        "Vinh",
        // 无法识别
        "42 Wallaby Way, Sydney",
        "",
    ];

    for addr in test_cases {
        println!("输入: \"{}\"", addr);
        match comparator.matcher().best_candidate(addr) {
            Some(c) => println!(
                "  省份: {}  (变体 {:?}，位置 {}，词边界 {})",
                c.official, c.variant, c.position, c.is_word_boundary
            ),
            None => println!("  省份: {}", UNRESOLVED),
        }
        println!();
    }

    println!("=== 地址比对演示 ===\n");

    let pairs = vec![
        ("123 Lê Lợi, Q.1, Hồ Chí Minh", "123 Lê Lợi, Q.1, TPHCM"),
        ("170 Hùng Vương, Bến Tre", "170 Hùng Vương, Vinh Long"),
        ("Phường 1, TP. Vũng Tàu", "Thủ Dầu Một, Bình Dương"),
        ("15 Trần Quý Cáp, KH", "45 Hàng Bông, Hà Nội"),
        ("42 Wallaby Way", "Hà Nội"),
    ];

    for (i, (a1, a2)) in pairs.into_iter().enumerate() {
        let record = comparator.compare_address_pair(a1, a2, i + 1);
        println!(
            "#{} {} | {} => {} ({})",
            record.index, record.province1, record.province2, record.is_match, record.reason
        );
    }

    println!("\n=== 合并关系 ===\n");

    for (old, new) in comparator.merges().iter() {
        println!("{} -> {}", old, new);
    }
}
